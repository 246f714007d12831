//! # Inline Kinds
//!
//! Inline constructs that own their syntax delimiters. The recognizers read
//! these constants; they never hardcode `<<` or `:`.
//!
//! - **`AnnotationRef`**: `OPEN = b"<<"`, `CLOSE = b">>"`
//! - **`Emoji`**: `DELIM = b':'`
//! - **`Caret`**: the editor's caret placeholder, transparent to identifiers

pub mod annotation_ref;
pub mod caret;
pub mod emoji;

pub use annotation_ref::AnnotationRef;
pub use caret::Caret;
pub use emoji::Emoji;
