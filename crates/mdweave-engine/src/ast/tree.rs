use super::kind::{NodeKind, NodeType};

/// Stable index of a node in its [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena storage for one node.
///
/// Parent and sibling links are plain indices; the arena owns every node
/// and `children` lists child ids in document order.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    tokens: String,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document tree. Node 0 is always the [`NodeKind::Document`] root.
///
/// Trees are built once and then only read; renderers borrow them
/// immutably, so one tree can feed several renders.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                tokens: String::new(),
                parent: None,
                prev: None,
                next: None,
                children: vec![],
            }],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> Node<'_> {
        self.get(self.root_id())
    }

    pub fn get(&self, id: NodeId) -> Node<'_> {
        debug_assert!(id.0 < self.nodes.len(), "node id {id:?} out of bounds");
        Node { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists.
        false
    }

    /// Appends a childless node without tokens as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.append_with_tokens(parent, kind, String::new())
    }

    /// Appends a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics when a heading level lies outside 1..=6. That is a tree
    /// construction bug, not an input condition.
    pub fn append_with_tokens(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        tokens: impl Into<String>,
    ) -> NodeId {
        if let NodeKind::Heading { level } = kind {
            assert!(
                (1..=6).contains(&level),
                "heading level {level} out of range 1..=6"
            );
        }

        let id = NodeId(self.nodes.len());
        let prev = self.nodes[parent.0].children.last().copied();
        if let Some(prev) = prev {
            self.nodes[prev.0].next = Some(id);
        }
        self.nodes.push(NodeData {
            kind,
            tokens: tokens.into(),
            parent: Some(parent),
            prev,
            next: None,
            children: vec![],
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Mutable access to a node's attributes while the tree is still
    /// under construction (e.g. deciding list tightness on close).
    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub(crate) fn tokens_mut(&mut self, id: NodeId) -> &mut String {
        &mut self.nodes[id.0].tokens
    }
}

/// A borrowed handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("tokens", &self.tokens())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: Option<NodeId>) -> Option<Node<'t>> {
        id.map(|id| self.tree.get(id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub fn kind(&self) -> &'t NodeKind {
        &self.data().kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind().node_type()
    }

    pub fn tokens(&self) -> &'t str {
        &self.data().tokens
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.at(self.data().parent)
    }

    pub fn prev(&self) -> Option<Node<'t>> {
        self.at(self.data().prev)
    }

    pub fn next(&self) -> Option<Node<'t>> {
        self.at(self.data().next)
    }

    pub fn first_child(&self) -> Option<Node<'t>> {
        self.at(self.data().children.first().copied())
    }

    pub fn last_child(&self) -> Option<Node<'t>> {
        self.at(self.data().children.last().copied())
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    pub fn children(self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.get(id))
    }

    /// First direct child of the given type.
    pub fn child_by_type(self, ty: NodeType) -> Option<Node<'t>> {
        self.children().find(|c| c.node_type() == ty)
    }

    /// Whether this node is the last child of its parent.
    pub fn is_last_child(&self) -> bool {
        self.data().next.is_none()
    }

    /// Flattened text content of the subtree: text runs, code-span
    /// content and inline math, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type() {
            NodeType::Text | NodeType::CodeSpanContent | NodeType::InlineMath => {
                out.push_str(self.tokens())
            }
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}
