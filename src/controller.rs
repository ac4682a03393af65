//! Expansion/selection controller: toggle operations under the state invariants.
//!
//! These functions validate the target node against the tree and update one
//! state set. They never talk to loaders or observers; [`TreeView`](crate::view::TreeView)
//! acts on the returned outcome.

use crate::error::TreeError;
use crate::model::{NodeRef, Tree};
use crate::state::{ExpansionState, SelectionState};

/// Result of a successful expansion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionChange {
    /// The node was opened. `needs_load` is set when its children must be
    /// fetched before anything can be shown under it.
    Expanded { needs_load: bool },
    /// The node was closed.
    Collapsed,
}

impl ExpansionChange {
    /// Whether the node is open after the toggle.
    pub fn is_expanded(self) -> bool {
        matches!(self, ExpansionChange::Expanded { .. })
    }
}

/// Look up a node that is allowed to receive interaction.
fn interactive_node<'a>(tree: &'a Tree, id: &str) -> Result<&'a NodeRef, TreeError> {
    let node = tree
        .find_by_id(id)
        .ok_or_else(|| TreeError::UnknownNode(id.into()))?;
    if node.disabled {
        return Err(TreeError::Disabled(node.id.clone()));
    }
    Ok(node)
}

/// Flip the expansion of `id`.
pub fn toggle_expansion(
    tree: &Tree,
    expansion: &mut ExpansionState,
    id: &str,
) -> Result<ExpansionChange, TreeError> {
    let node = interactive_node(tree, id)?;
    if expansion.remove(id) {
        return Ok(ExpansionChange::Collapsed);
    }
    if !node.has_children {
        return Err(TreeError::NotExpandable(node.id.clone()));
    }
    expansion.insert(node.id.clone());
    Ok(ExpansionChange::Expanded {
        needs_load: node.needs_load(),
    })
}

/// Apply a selection toggle to `id`. Returns whether the selection changed.
pub fn toggle_selection(
    tree: &Tree,
    selection: &mut SelectionState,
    id: &str,
) -> Result<bool, TreeError> {
    let node = interactive_node(tree, id)?;
    Ok(selection.toggle(node.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeId, TreeNode};
    use crate::state::SelectionMode;

    fn build_tree() -> Tree {
        Tree::new(vec![
            TreeNode::new("a", "A").with_children(vec![
                TreeNode::new("a1", "A1"),
                TreeNode::new("a2", "A2"),
                TreeNode::new("a3", "A3").disabled(true),
            ]),
            TreeNode::lazy("b", "B"),
            TreeNode::lazy("c", "C").disabled(true),
        ])
    }

    #[test]
    fn expand_then_collapse() {
        let tree = build_tree();
        let mut exp = ExpansionState::new();
        assert_eq!(
            toggle_expansion(&tree, &mut exp, "a"),
            Ok(ExpansionChange::Expanded { needs_load: false })
        );
        assert!(exp.contains("a"));
        assert_eq!(
            toggle_expansion(&tree, &mut exp, "a"),
            Ok(ExpansionChange::Collapsed)
        );
        assert!(exp.is_empty());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let tree = build_tree();
        let mut exp: ExpansionState = [NodeId::from("b")].into_iter().collect();
        let before = exp.clone();
        toggle_expansion(&tree, &mut exp, "a").unwrap();
        toggle_expansion(&tree, &mut exp, "a").unwrap();
        assert_eq!(exp, before);
    }

    #[test]
    fn expand_lazy_reports_load() {
        let tree = build_tree();
        let mut exp = ExpansionState::new();
        let change = toggle_expansion(&tree, &mut exp, "b").unwrap();
        assert_eq!(change, ExpansionChange::Expanded { needs_load: true });
        assert!(change.is_expanded());
        assert!(exp.is_pending(tree.find_by_id("b").unwrap()));
    }

    #[test]
    fn leaf_is_not_expandable() {
        let tree = build_tree();
        let mut exp = ExpansionState::new();
        assert_eq!(
            toggle_expansion(&tree, &mut exp, "a1"),
            Err(TreeError::NotExpandable(NodeId::from("a1")))
        );
        assert!(exp.is_empty());
    }

    #[test]
    fn disabled_and_unknown_are_rejected() {
        let tree = build_tree();
        let mut exp = ExpansionState::new();
        assert_eq!(
            toggle_expansion(&tree, &mut exp, "c"),
            Err(TreeError::Disabled(NodeId::from("c")))
        );
        assert_eq!(
            toggle_expansion(&tree, &mut exp, "nope"),
            Err(TreeError::UnknownNode(NodeId::from("nope")))
        );

        let mut sel = SelectionState::new(SelectionMode::Multi);
        assert_eq!(
            toggle_selection(&tree, &mut sel, "a3"),
            Err(TreeError::Disabled(NodeId::from("a3")))
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn selection_toggles_by_mode() {
        let tree = build_tree();
        let mut single = SelectionState::new(SelectionMode::Single);
        assert_eq!(toggle_selection(&tree, &mut single, "a1"), Ok(true));
        assert_eq!(toggle_selection(&tree, &mut single, "a1"), Ok(false));
        assert_eq!(single.ids(), vec![NodeId::from("a1")]);

        let mut multi = SelectionState::new(SelectionMode::Multi);
        toggle_selection(&tree, &mut multi, "a1").unwrap();
        toggle_selection(&tree, &mut multi, "a2").unwrap();
        toggle_selection(&tree, &mut multi, "a1").unwrap();
        assert_eq!(multi.ids(), vec![NodeId::from("a2")]);
    }
}
