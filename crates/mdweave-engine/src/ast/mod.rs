//! # Document Tree
//!
//! Arena-backed node tree plus the generic enter/exit walker.
//!
//! ## Modules
//!
//! - **`kind`**: `NodeKind` (tag + variant attributes) and the bare `NodeType` tag
//! - **`tree`**: `Tree` arena, `NodeId` indices and the borrowed `Node` handle
//! - **`walk`**: `walk()` with `WalkStatus` control (continue / skip children / stop)
//!
//! ## Key Invariants
//!
//! - Children are ordered; order is document order
//! - Parent and sibling links are indices, never ownership edges
//! - A tree is read-only once built; rendering never mutates it

pub mod kind;
pub mod tree;
pub mod walk;

pub use kind::{
    CellAlign, CodeBlockData, EmphasisMarker, LinkData, ListData, ListKind, NodeKind, NodeType,
    TildeMarker,
};
pub use tree::{Node, NodeId, Tree};
pub use walk::{WalkStatus, walk};
