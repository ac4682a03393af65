//! Visible-set flattener.
//!
//! [`flatten`] turns the tree and the expansion set into the ordered list of
//! rows currently on screen. Rendering and keyboard traversal both read this
//! list, so a node's neighbor on screen is always its neighbor for the arrow
//! keys.

use crate::model::{NodeId, NodeRef, Tree};
use crate::state::ExpansionState;

/// A node in the flattened visible list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNode {
    /// The node itself.
    pub node: NodeRef,
    /// Depth in tree (0 = root).
    pub depth: usize,
    /// Whether the node is in the expansion set.
    pub expanded: bool,
    /// Index of the parent row in the visible list (`None` for roots).
    pub parent: Option<usize>,
    /// 1-based position among siblings.
    pub position: usize,
    /// Number of siblings, including this node.
    pub set_size: usize,
}

impl VisibleNode {
    /// The node id.
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// Whether the node shows a disclosure affordance.
    pub fn is_disclosable(&self) -> bool {
        self.node.has_children
    }
}

/// Pre-order list of visible nodes.
///
/// Children are emitted only for expanded nodes, so nothing below a collapsed
/// or unexpanded node appears.
pub fn flatten(tree: &Tree, expansion: &ExpansionState) -> Vec<VisibleNode> {
    let mut out = Vec::new();
    collect_visible(tree.roots(), expansion, 0, None, &mut out);
    out
}

fn collect_visible(
    nodes: &[NodeRef],
    expansion: &ExpansionState,
    depth: usize,
    parent: Option<usize>,
    out: &mut Vec<VisibleNode>,
) {
    let set_size = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        let expanded = expansion.contains(node.id.as_str());
        let index = out.len();
        out.push(VisibleNode {
            node: NodeRef::clone(node),
            depth,
            expanded,
            parent,
            position: i + 1,
            set_size,
        });
        if expanded {
            collect_visible(node.children(), expansion, depth + 1, Some(index), out);
        }
    }
}

/// Index of `id` in a visible list.
pub fn position_of(visible: &[VisibleNode], id: &str) -> Option<usize> {
    visible.iter().position(|row| row.node.id == id)
}
