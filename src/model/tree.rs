//! Tree operations: lookup, ancestry, walk, path-copy child replacement.

use std::collections::HashSet;
use std::sync::Arc;

use super::node::{Children, NodeId, NodeRef, TreeNode};
use crate::error::TreeError;

/// An immutable tree value.
///
/// Cloning is O(1). Every update returns a new `Tree` that shares all
/// untouched subtrees with the old one, so an old value stays a valid
/// snapshot for as long as anyone holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    roots: Arc<[NodeRef]>,
}

impl Tree {
    /// Build a tree from root nodes.
    pub fn new(roots: Vec<TreeNode>) -> Self {
        let roots: Vec<NodeRef> = roots.into_iter().map(Arc::new).collect();
        Self {
            roots: roots.into(),
        }
    }

    /// The root nodes in order.
    pub fn roots(&self) -> &[NodeRef] {
        &self.roots
    }

    /// Whether both values are the same version (no update happened between them).
    pub fn ptr_eq(&self, other: &Tree) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }

    /// Depth-first search over the whole tree, including unexpanded subtrees.
    pub fn find_by_id(&self, id: &str) -> Option<&NodeRef> {
        find_in(&self.roots, id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Ids from the immediate parent of `id` up to its root.
    ///
    /// Empty for root nodes and for unknown ids.
    pub fn ancestors(&self, id: &str) -> Vec<NodeId> {
        let mut path = Vec::new();
        if path_in(&self.roots, id, &mut path) {
            path.reverse();
            path
        } else {
            Vec::new()
        }
    }

    /// Pre-order traversal of every loaded node.
    pub fn walk_depth_first(&self) -> Vec<NodeRef> {
        let mut result = Vec::new();
        let mut stack: Vec<&NodeRef> = self.roots.iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(Arc::clone(current));
            // Push children in reverse so the first child is visited first.
            for child in current.children().iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Number of loaded nodes.
    pub fn len(&self) -> usize {
        let mut stack: Vec<&NodeRef> = self.roots.iter().collect();
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Whether the tree has no roots.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Return a new tree where `id` has `children` loaded and its
    /// `has_children` hint set to `!children.is_empty()`.
    ///
    /// Only the nodes on the path to `id` are copied. An unknown id returns
    /// the same tree value.
    pub fn replace_children(&self, id: &str, children: Vec<TreeNode>) -> Tree {
        let has_children = !children.is_empty();
        let children = Children::loaded(children);
        match replace_in(&self.roots, id, &children, has_children) {
            Some(roots) => Tree { roots },
            None => self.clone(),
        }
    }

    /// Check that every id occurs once.
    ///
    /// Interaction methods assume unique ids and never call this.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for node in self.walk_depth_first() {
            if !seen.insert(node.id.clone()) {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<TreeNode>> for Tree {
    fn from(roots: Vec<TreeNode>) -> Self {
        Self::new(roots)
    }
}

fn find_in<'a>(nodes: &'a [NodeRef], id: &str) -> Option<&'a NodeRef> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Push ancestors of `id` (deepest last) onto `path`. Returns whether `id` was found.
fn path_in(nodes: &[NodeRef], id: &str, path: &mut Vec<NodeId>) -> bool {
    for node in nodes {
        if node.id == id {
            return true;
        }
        path.push(node.id.clone());
        if path_in(node.children(), id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn replace_in(
    nodes: &[NodeRef],
    id: &str,
    children: &Children,
    has_children: bool,
) -> Option<Arc<[NodeRef]>> {
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            TreeNode {
                children: children.clone(),
                has_children,
                ..TreeNode::clone(node)
            }
        } else if let Some(kids) = replace_in(node.children(), id, children, has_children) {
            TreeNode {
                children: Children::Loaded(kids),
                ..TreeNode::clone(node)
            }
        } else {
            continue;
        };
        let mut copy = nodes.to_vec();
        copy[index] = Arc::new(replacement);
        return Some(copy.into());
    }
    None
}
