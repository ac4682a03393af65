//! SelectionState: selected ids under a single/multi mode.

use std::collections::BTreeSet;

use crate::model::NodeId;

/// How many nodes can be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one node; choosing a node replaces the selection.
    #[default]
    Single,
    /// Any number of nodes; choosing a node flips its membership.
    Multi,
}

/// Tracks selected node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: SelectionMode,
    selected: BTreeSet<NodeId>,
}

impl SelectionState {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether more than one node may be selected.
    pub fn is_multi(&self) -> bool {
        self.mode == SelectionMode::Multi
    }

    /// Apply a selection toggle for `id`. Returns `true` if the set changed.
    ///
    /// Single mode never deselects: choosing the selected node keeps it.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        match self.mode {
            SelectionMode::Single => {
                if self.selected.len() == 1 && self.selected.contains(&id) {
                    false
                } else {
                    self.selected.clear();
                    self.selected.insert(id);
                    true
                }
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    /// Check if `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in sorted order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.selected.iter().cloned().collect()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn default_is_single() {
        assert_eq!(SelectionState::default().mode(), SelectionMode::Single);
    }

    #[test]
    fn single_replaces() {
        let mut sel = SelectionState::new(SelectionMode::Single);
        assert!(sel.toggle(id("a")));
        assert!(sel.toggle(id("b")));
        assert_eq!(sel.ids(), vec![id("b")]);
    }

    #[test]
    fn single_reselect_keeps_selection() {
        let mut sel = SelectionState::new(SelectionMode::Single);
        sel.toggle(id("a"));
        assert!(!sel.toggle(id("a")));
        assert!(sel.is_selected("a"));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn single_never_exceeds_one() {
        let mut sel = SelectionState::new(SelectionMode::Single);
        for name in ["a", "b", "a", "c", "c", "b"] {
            sel.toggle(id(name));
            assert!(sel.len() <= 1);
        }
        assert_eq!(sel.ids(), vec![id("b")]);
    }

    #[test]
    fn multi_flips_membership() {
        let mut sel = SelectionState::new(SelectionMode::Multi);
        assert!(sel.is_multi());
        sel.toggle(id("a1"));
        sel.toggle(id("a2"));
        sel.toggle(id("a1"));
        assert_eq!(sel.ids(), vec![id("a2")]);
    }

    #[test]
    fn clear_empties() {
        let mut sel = SelectionState::new(SelectionMode::Multi);
        sel.toggle(id("a"));
        sel.toggle(id("b"));
        sel.clear();
        assert!(sel.is_empty());
    }
}
