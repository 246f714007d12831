//! Per-dialect dispatch from node type to handler.

use crate::ast::{Node, NodeType, WalkStatus};
use crate::error::RenderError;

/// A render handler, invoked on entry (`true`) and exit (`false`).
pub type Handler<D> = fn(&mut D, Node<'_>, bool) -> WalkStatus;

/// Immutable table holding exactly one handler per [`NodeType`].
///
/// Only obtainable through [`DispatchTableBuilder::build`], which refuses
/// to produce a table with gaps.
pub struct DispatchTable<D> {
    handlers: Box<[Handler<D>]>,
}

impl<D> DispatchTable<D> {
    pub fn builder() -> DispatchTableBuilder<D> {
        DispatchTableBuilder {
            handlers: vec![None; NodeType::COUNT],
        }
    }

    pub fn get(&self, ty: NodeType) -> Handler<D> {
        self.handlers[ty.index()]
    }
}

/// Collects handler registrations for a [`DispatchTable`].
pub struct DispatchTableBuilder<D> {
    handlers: Vec<Option<Handler<D>>>,
}

impl<D> DispatchTableBuilder<D> {
    /// Registers `handler` for `ty`, replacing any earlier registration.
    #[must_use]
    pub fn on(mut self, ty: NodeType, handler: Handler<D>) -> Self {
        self.handlers[ty.index()] = Some(handler);
        self
    }

    pub fn is_registered(&self, ty: NodeType) -> bool {
        self.handlers[ty.index()].is_some()
    }

    /// Finishes the table, failing on the first unregistered node type.
    pub fn build(self) -> Result<DispatchTable<D>, RenderError> {
        let handlers = NodeType::ALL
            .iter()
            .map(|&ty| self.handlers[ty.index()].ok_or(RenderError::MissingHandler(ty)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DispatchTable {
            handlers: handlers.into_boxed_slice(),
        })
    }
}
