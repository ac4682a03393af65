//! Node types: NodeId, TreeNode, Children.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Caller-supplied node identifier, unique across the whole tree.
///
/// Cheap to clone (shared string). Borrows as `str`, so maps and sets keyed by
/// `NodeId` can be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Create a new id.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

/// Shared handle to an immutable node. Unchanged subtrees are shared between
/// tree versions through these handles.
pub type NodeRef = Arc<TreeNode>;

/// Load state of a node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Children have not been fetched. Whether any exist is given by
    /// [`TreeNode::has_children`].
    NotLoaded,
    /// Children are present (possibly an empty list).
    Loaded(Arc<[NodeRef]>),
}

impl Children {
    /// Build a loaded child list from owned nodes.
    pub fn loaded(nodes: Vec<TreeNode>) -> Self {
        let refs: Vec<NodeRef> = nodes.into_iter().map(Arc::new).collect();
        Children::Loaded(refs.into())
    }

    /// The loaded children, or `None` if not loaded.
    pub fn as_loaded(&self) -> Option<&[NodeRef]> {
        match self {
            Children::NotLoaded => None,
            Children::Loaded(nodes) => Some(nodes),
        }
    }

    /// Loaded children, or an empty slice.
    pub fn as_slice(&self) -> &[NodeRef] {
        self.as_loaded().unwrap_or(&[])
    }

    /// Whether the children have been loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Children::Loaded(_))
    }

    /// Whether the loaded list has the same id sequence as `nodes`.
    ///
    /// An unloaded list never matches.
    pub fn same_ids(&self, nodes: &[TreeNode]) -> bool {
        match self {
            Children::NotLoaded => false,
            Children::Loaded(current) => {
                current.len() == nodes.len()
                    && current.iter().zip(nodes).all(|(a, b)| a.id == b.id)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TreeNode
// ---------------------------------------------------------------------------

/// A labeled node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Unique id.
    pub id: NodeId,
    /// Display text.
    pub label: String,
    /// Child load state.
    pub children: Children,
    /// Disclosure hint, independent of whether children are loaded.
    pub has_children: bool,
    /// Disabled nodes stay visible but ignore activation.
    pub disabled: bool,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Children::NotLoaded,
            has_children: false,
            disabled: false,
        }
    }

    /// Create a node whose children will be fetched on first expansion.
    pub fn lazy(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self::new(id, label).with_has_children(true)
    }

    /// Set loaded children (builder). Updates the `has_children` hint.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.has_children = !children.is_empty();
        self.children = Children::loaded(children);
        self
    }

    /// Override the disclosure hint (builder).
    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// Set whether this node is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Loaded children, or an empty slice.
    pub fn children(&self) -> &[NodeRef] {
        self.children.as_slice()
    }

    /// Whether expanding this node requires fetching children first.
    pub fn needs_load(&self) -> bool {
        self.has_children && self.children().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_borrows_as_str() {
        let id = NodeId::from("alpha");
        assert_eq!(id.as_str(), "alpha");
        assert_eq!(id, "alpha");
        assert_eq!(id.to_string(), "alpha");

        let mut set = std::collections::BTreeSet::new();
        set.insert(id);
        assert!(set.contains("alpha"));
    }

    #[test]
    fn new_is_leaf() {
        let node = TreeNode::new("a", "A");
        assert_eq!(node.label, "A");
        assert!(!node.has_children);
        assert!(!node.disabled);
        assert!(!node.children.is_loaded());
        assert!(!node.needs_load());
    }

    #[test]
    fn lazy_needs_load() {
        let node = TreeNode::lazy("b", "B");
        assert!(node.has_children);
        assert!(node.needs_load());
        assert!(node.children().is_empty());
    }

    #[test]
    fn with_children_sets_hint() {
        let node = TreeNode::new("a", "A").with_children(vec![TreeNode::new("a1", "A1")]);
        assert!(node.has_children);
        assert!(!node.needs_load());
        assert_eq!(node.children().len(), 1);

        let empty = TreeNode::lazy("b", "B").with_children(Vec::new());
        assert!(!empty.has_children);
        assert!(empty.children.is_loaded());
    }

    #[test]
    fn loaded_but_empty_with_hint_needs_load() {
        let node = TreeNode::new("a", "A")
            .with_children(Vec::new())
            .with_has_children(true);
        assert!(node.needs_load());
    }

    #[test]
    fn same_ids_compares_sequence() {
        let children = Children::loaded(vec![TreeNode::new("x", "X"), TreeNode::new("y", "Y")]);
        assert!(children.same_ids(&[TreeNode::new("x", "other"), TreeNode::new("y", "Y")]));
        assert!(!children.same_ids(&[TreeNode::new("y", "Y"), TreeNode::new("x", "X")]));
        assert!(!children.same_ids(&[TreeNode::new("x", "X")]));
        assert!(!Children::NotLoaded.same_ids(&[]));
    }

    #[test]
    fn disabled_builder() {
        assert!(TreeNode::new("a", "A").disabled(true).disabled);
    }
}
