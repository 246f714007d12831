use super::tree::{Node, NodeId, Tree};

/// What the walker should do after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Descend into children on entry; move on after exit.
    Continue,
    /// Only meaningful on entry: skip the children and this node's exit visit.
    SkipChildren,
    /// Abort the whole traversal.
    Stop,
}

/// Depth-first, document-order traversal of the subtree rooted at `root`.
///
/// Every node is visited entering (before its children) and exiting (after
/// them) unless the entering visit returns [`WalkStatus::SkipChildren`].
/// The visitor's return value is the only cancellation channel.
///
/// Iterative over the parent/sibling links, so nesting depth is not bounded
/// by the call stack. Returns [`WalkStatus::Stop`] if the visitor aborted,
/// [`WalkStatus::Continue`] otherwise.
pub fn walk<F>(tree: &Tree, root: NodeId, mut visit: F) -> WalkStatus
where
    F: FnMut(Node<'_>, bool) -> WalkStatus,
{
    let mut node = tree.get(root);
    let mut entering = true;

    loop {
        let status = visit(node, entering);
        if status == WalkStatus::Stop {
            return WalkStatus::Stop;
        }

        if entering {
            if status == WalkStatus::Continue {
                match node.first_child() {
                    Some(child) => node = child,
                    // Leaf: deliver its exit visit next.
                    None => entering = false,
                }
                continue;
            }
            // SkipChildren: fall through as if the node had been exited.
        }

        if node.id() == root {
            return WalkStatus::Continue;
        }
        match node.next() {
            Some(next) => {
                node = next;
                entering = true;
            }
            None => {
                // Every non-root node inside the walked subtree has a parent.
                let Some(parent) = node.parent() else {
                    return WalkStatus::Continue;
                };
                node = parent;
                entering = false;
            }
        }
    }
}
