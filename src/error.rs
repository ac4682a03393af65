//! Error types for tree operations.
//!
//! The widget's interaction methods never surface these: they are the reason
//! codes behind the silent no-ops, exposed through the `try_` variants for
//! hosts that want to know why an interaction did nothing.

use crate::model::NodeId;

/// Why a tree operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No node with this id exists in the tree.
    #[error("unknown node `{0}`")]
    UnknownNode(NodeId),
    /// The node is disabled and ignores interaction.
    #[error("node `{0}` is disabled")]
    Disabled(NodeId),
    /// The node has no children and cannot be expanded.
    #[error("node `{0}` has no children to disclose")]
    NotExpandable(NodeId),
    /// The same id occurs more than once (reported by [`Tree::validate`](crate::model::Tree::validate)).
    #[error("duplicate node id `{0}`")]
    DuplicateId(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let id = NodeId::from("a1");
        assert_eq!(TreeError::UnknownNode(id.clone()).to_string(), "unknown node `a1`");
        assert_eq!(TreeError::Disabled(id.clone()).to_string(), "node `a1` is disabled");
        assert_eq!(
            TreeError::NotExpandable(id.clone()).to_string(),
            "node `a1` has no children to disclose"
        );
        assert_eq!(TreeError::DuplicateId(id).to_string(), "duplicate node id `a1`");
    }
}
