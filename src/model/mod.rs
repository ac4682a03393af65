//! Tree model: node identity, tagged child state, path-copy tree operations.

pub mod node;
pub mod tree;

pub use node::{Children, NodeId, NodeRef, TreeNode};
pub use tree::Tree;
