use crate::ast::{Tree, walk};
use crate::error::RenderError;

use super::base::BaseRenderer;
use super::dispatch::{DispatchTable, DispatchTableBuilder};
use super::options::RenderOptions;

/// A concrete output flavour: per-instance state plus its handler set.
pub trait Dialect: Sized {
    /// Short name used in log output.
    const NAME: &'static str;

    fn new(options: &RenderOptions) -> Self;

    /// Registers one handler per node type.
    fn register(builder: DispatchTableBuilder<Self>) -> DispatchTableBuilder<Self>;

    fn base(&self) -> &BaseRenderer;

    fn into_output(self) -> String {
        self.into_base().into_output()
    }

    fn into_base(self) -> BaseRenderer;
}

/// Drives a [`Dialect`] over one tree.
///
/// Construction builds the dispatch table and fails with
/// [`RenderError::MissingHandler`] before any node is visited. A renderer
/// is consumed by the render, so every pass gets fresh output state.
pub struct Renderer<'t, D: Dialect> {
    tree: &'t Tree,
    table: DispatchTable<D>,
    dialect: D,
}

impl<'t, D: Dialect> Renderer<'t, D> {
    pub fn new(tree: &'t Tree, options: &RenderOptions) -> Result<Self, RenderError> {
        let table = D::register(DispatchTable::builder()).build()?;
        log::debug!("built {} renderer over {} nodes", D::NAME, tree.len());
        Ok(Self {
            tree,
            table,
            dialect: D::new(options),
        })
    }

    /// Walks the whole tree and hands back the dialect state.
    pub fn run(self) -> D {
        let Self {
            tree,
            table,
            mut dialect,
        } = self;
        walk(tree, tree.root_id(), |node, entering| {
            table.get(node.node_type())(&mut dialect, node, entering)
        });
        dialect
    }

    /// Walks the whole tree and returns the rendered markup.
    pub fn render(self) -> String {
        self.run().into_output()
    }
}
