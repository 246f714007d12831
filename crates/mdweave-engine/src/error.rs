use crate::ast::NodeType;

/// Errors raised while constructing a renderer.
///
/// Rendering itself is total; the only failure is a dispatch table that
/// does not cover every node type, which is reported before any walk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("no render handler registered for node type {0:?}")]
    MissingHandler(NodeType),
}
