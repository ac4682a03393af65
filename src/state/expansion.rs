//! ExpansionState: the set of open node ids.

use std::collections::BTreeSet;

use crate::model::{NodeId, TreeNode};

/// Set of expanded node ids.
///
/// Only nodes with `has_children` may be members; the controller enforces this
/// before inserting. A member whose children are not loaded yet is pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<NodeId>,
}

impl ExpansionState {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is expanded.
    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Mark `id` expanded. Returns `true` if it was not already.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.expanded.insert(id)
    }

    /// Mark `id` collapsed. Returns `true` if it was expanded.
    pub fn remove(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    /// Collapse everything, returning the ids that were expanded.
    pub fn clear(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.expanded).into_iter().collect()
    }

    /// Expanded but still waiting for its children.
    pub fn is_pending(&self, node: &TreeNode) -> bool {
        self.contains(node.id.as_str()) && node.needs_load()
    }

    /// Expanded ids in sorted order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.expanded.iter().cloned().collect()
    }

    /// Iterate over expanded ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.expanded.iter()
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl FromIterator<NodeId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().collect(),
        }
    }
}
