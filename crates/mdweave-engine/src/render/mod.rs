//! # Rendering
//!
//! A [`Renderer`] drives the walker over a finished [`Tree`](crate::ast::Tree)
//! and looks up one handler per visited node in the dialect's
//! [`DispatchTable`]. Handlers write through the shared [`BaseRenderer`].
//!
//! ## Modules
//!
//! - **`base`**: output buffer, escaping, tag emission, suppression counter
//! - **`dispatch`**: node type to handler table, checked for gaps when built
//! - **`renderer`**: the [`Dialect`] trait and the [`Renderer`] driver
//! - **`html`**: plain HTML with layout newlines
//! - **`editor`**: marker-preserving HTML for editor round trips
//! - **`text`**: text hooks used by the editor dialect
//! - **`options`**: [`RenderOptions`]

pub mod base;
mod common;
pub mod dispatch;
pub mod editor;
pub mod html;
pub mod options;
pub mod renderer;
pub mod text;

pub use base::{BaseRenderer, escape_html};
pub use dispatch::{DispatchTable, DispatchTableBuilder, Handler};
pub use editor::EditorDialect;
pub use html::HtmlDialect;
pub use options::RenderOptions;
pub use renderer::{Dialect, Renderer};
