//! # mdweave engine
//!
//! Markdown to HTML through a node tree and per-dialect dispatch tables.
//!
//! ## Modules
//!
//! - **`ast`**: arena tree, node kinds, the enter/exit walker
//! - **`parsing`**: Markdown source to tree, plus the inline extensions
//! - **`render`**: dispatch tables, the shared base renderer, dialects
//! - **`error`**: [`RenderError`]
//!
//! ## Example
//!
//! ```
//! use mdweave_engine::{ParseOptions, RenderOptions, markdown_to_html};
//!
//! let html = markdown_to_html(
//!     "see <<intro \"Intro\">>",
//!     &ParseOptions::default(),
//!     &RenderOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(
//!     html,
//!     "<p>see <span class=\"annotation-ref\" data-id=\"intro\">Intro</span></p>\n"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod parsing;
pub mod render;

pub use ast::{Node, NodeId, NodeKind, NodeType, Tree, WalkStatus, walk};
pub use error::RenderError;
pub use parsing::{ParseOptions, parse};
pub use render::{Dialect, EditorDialect, HtmlDialect, RenderOptions, Renderer};

/// Render a tree as plain HTML.
pub fn render_html(tree: &Tree, options: &RenderOptions) -> Result<String, RenderError> {
    Ok(Renderer::<HtmlDialect>::new(tree, options)?.render())
}

/// Render a tree as editor round-trip HTML.
pub fn render_editor(tree: &Tree, options: &RenderOptions) -> Result<String, RenderError> {
    Ok(Renderer::<EditorDialect>::new(tree, options)?.render())
}

/// Parse and render as plain HTML in one step.
pub fn markdown_to_html(
    source: &str,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<String, RenderError> {
    render_html(&parse(source, parse_options), render_options)
}

/// Parse and render as editor HTML in one step.
pub fn markdown_to_editor_html(
    source: &str,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<String, RenderError> {
    render_editor(&parse(source, parse_options), render_options)
}
