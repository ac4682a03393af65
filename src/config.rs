//! Tree configuration.

use crate::event::KeyMap;
use crate::model::NodeId;
use crate::state::SelectionMode;

/// Configuration for a [`TreeView`](crate::view::TreeView).
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Single or multi selection.
    pub selection_mode: SelectionMode,
    /// Accessible name of the tree container.
    pub label: Option<String>,
    /// Nodes open when the tree is created. Ids that are unknown or have no
    /// children are ignored; lazy nodes listed here are requested at once.
    pub expanded: Vec<NodeId>,
    /// Key bindings.
    pub keymap: KeyMap,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            label: None,
            expanded: Vec::new(),
            keymap: KeyMap::with_defaults(),
        }
    }
}

impl TreeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection mode (builder).
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Shorthand for `with_selection_mode(SelectionMode::Multi)`.
    pub fn multi_select(self) -> Self {
        self.with_selection_mode(SelectionMode::Multi)
    }

    /// Set the accessible label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Open a node at creation (builder).
    pub fn with_expanded(mut self, id: impl Into<NodeId>) -> Self {
        self.expanded.push(id.into());
        self
    }

    /// Replace the key map (builder).
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }
}
