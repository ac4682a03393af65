//! # arbor
//!
//! An accessible disclosure/selection tree engine.
//!
//! arbor keeps a hierarchical, possibly lazily loaded tree of nodes and lets a
//! user open and close branches, select one or many nodes, and move a single
//! roving focus with the keyboard. The tree value is persistent: merging
//! fetched children copies only the path to the changed node, so any earlier
//! version a caller holds stays valid. The same flattened visible list feeds
//! both an accessibility tree and a text outline.
//!
//! ## Core Systems
//!
//! - **[`model`]**: Node ids, nodes, and the persistent [`Tree`]
//! - **[`state`]**: Expansion and selection sets
//! - **[`controller`]**: Pure toggle operations over the tree and state
//! - **[`lazy`]**: Child loaders and the load coordinator
//! - **[`visible`]**: Visible-set flattener
//! - **[`focus`]**: Roving focus navigator
//! - **[`event`]**: Key input, key map, outward notifications
//! - **[`view`]**: [`TreeView`], the widget instance tying everything together
//! - **[`render`]**: Accessibility tree and text outline
//! - **[`testing`]**: Pilot, recording loaders, notification log

// Foundation
pub mod error;
pub mod model;

// State and operations
pub mod controller;
pub mod lazy;
pub mod state;

// Derived views
pub mod focus;
pub mod visible;

// Events and configuration
pub mod config;
pub mod event;

// Widget
pub mod render;
pub mod view;

// Headless test support
pub mod testing;

pub use config::TreeConfig;
pub use error::TreeError;
pub use model::{NodeId, Tree, TreeNode};
pub use view::{TreeView, TreeViewBuilder};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use arbor_macros::tree;

/// Common imports for hosts embedding a tree.
pub mod prelude {
    pub use crate::config::TreeConfig;
    pub use crate::error::TreeError;
    pub use crate::event::{Key, KeyEvent, KeyMap, Modifiers, NavAction, Notification};
    pub use crate::lazy::{ChildLoader, LoadCompletion, LoadState};
    pub use crate::model::{NodeId, Tree, TreeNode};
    pub use crate::state::SelectionMode;
    pub use crate::view::TreeView;
}
