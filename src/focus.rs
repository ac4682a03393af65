//! Roving focus over the visible list.
//!
//! [`FocusNavigator`] holds the single active id. All moves are computed
//! against the flattened visible list passed in by the caller; the navigator
//! never stores the list itself, so it cannot go stale.

use crate::model::{NodeId, Tree};
use crate::visible::{position_of, VisibleNode};

/// The one keyboard tab stop inside the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusNavigator {
    active: Option<NodeId>,
}

impl FocusNavigator {
    /// Create a navigator with no active node.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active node id, if any.
    pub fn active(&self) -> Option<&NodeId> {
        self.active.as_ref()
    }

    /// Index of the active node in `visible`.
    pub fn active_index(&self, visible: &[VisibleNode]) -> Option<usize> {
        self.active
            .as_ref()
            .and_then(|id| position_of(visible, id.as_str()))
    }

    /// Make `id` active if it is visible. Returns whether the active id changed.
    pub fn focus(&mut self, visible: &[VisibleNode], id: &str) -> bool {
        match position_of(visible, id) {
            Some(index) => self.set(visible, index),
            None => false,
        }
    }

    /// Move one row down, stopping at the last row.
    pub fn move_next(&mut self, visible: &[VisibleNode]) -> bool {
        let target = match self.active_index(visible) {
            Some(index) => (index + 1).min(visible.len().saturating_sub(1)),
            None => 0,
        };
        self.set(visible, target)
    }

    /// Move one row up, stopping at the first row.
    pub fn move_previous(&mut self, visible: &[VisibleNode]) -> bool {
        let target = match self.active_index(visible) {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.set(visible, target)
    }

    /// Move to the first row.
    pub fn move_first(&mut self, visible: &[VisibleNode]) -> bool {
        self.set(visible, 0)
    }

    /// Move to the last row.
    pub fn move_last(&mut self, visible: &[VisibleNode]) -> bool {
        self.set(visible, visible.len().saturating_sub(1))
    }

    /// Move to the parent of the active row. Fails at root level.
    pub fn move_to_parent(&mut self, visible: &[VisibleNode]) -> bool {
        let parent = self
            .active_index(visible)
            .and_then(|index| visible[index].parent);
        match parent {
            Some(index) => self.set(visible, index),
            None => false,
        }
    }

    /// Move to the first child of the active row, if it is expanded and its
    /// first child is visible.
    pub fn move_to_first_child(&mut self, visible: &[VisibleNode]) -> bool {
        let Some(index) = self.active_index(visible) else {
            return false;
        };
        let child = index + 1;
        match visible.get(child) {
            Some(row) if row.parent == Some(index) => self.set(visible, child),
            _ => false,
        }
    }

    /// Re-home focus after the visible list changed.
    ///
    /// If the active node is no longer visible, focus moves to its nearest
    /// visible ancestor. If nothing is active (or nothing suitable is
    /// visible), the first row becomes the tab stop. Returns whether the
    /// active id changed.
    pub fn reconcile(&mut self, tree: &Tree, visible: &[VisibleNode]) -> bool {
        let before = self.active.clone();
        if visible.is_empty() {
            self.active = None;
            return before.is_some();
        }
        let still_visible = self.active_index(visible).is_some();
        if !still_visible {
            let ancestor = self.active.as_ref().and_then(|id| {
                tree.ancestors(id.as_str())
                    .into_iter()
                    .find(|a| position_of(visible, a.as_str()).is_some())
            });
            self.active = Some(ancestor.unwrap_or_else(|| visible[0].id().clone()));
        }
        self.active != before
    }

    /// Drop the active id.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Set the active row by index. Returns whether the active id changed.
    fn set(&mut self, visible: &[VisibleNode], index: usize) -> bool {
        let Some(row) = visible.get(index) else {
            return false;
        };
        if self.active.as_ref() == Some(row.id()) {
            return false;
        }
        self.active = Some(row.id().clone());
        true
    }
}
