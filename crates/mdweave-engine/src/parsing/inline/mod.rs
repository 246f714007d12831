//! # Inline Extensions
//!
//! Recognizers for the inline constructs CommonMark does not know about,
//! run over each text run after block and core inline parsing.
//!
//! ## Modules
//!
//! - **`cursor`**: byte cursor; a clone is a snapshot for backtracking
//! - **`kinds`**: delimiter constants owned by each construct
//! - **`lex`**: whitespace and link-title rules shared with links
//! - **`annotation_ref`**: `<<id "title">>`
//! - **`emoji`**: `:alias:` with built-in and custom aliases
//! - **`parser`**: `parse_inline()` splitting a run into [`InlineNode`]s
//!
//! A recognizer either matches completely or leaves the cursor where it
//! found it. Nothing partially matched ever reaches the tree.

pub mod annotation_ref;
pub mod cursor;
pub mod emoji;
pub mod kinds;
pub mod lex;
pub mod parser;
pub mod types;

pub use annotation_ref::{AnnotationRefMatch, try_parse_annotation_ref};
pub use cursor::Cursor;
pub use emoji::{EmojiMatch, EmojiValue, try_parse_emoji};
pub use parser::parse_inline;
pub use types::{InlineNode, Span};
