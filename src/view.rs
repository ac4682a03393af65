//! TreeView: one tree widget instance.
//!
//! [`TreeView`] owns the tree value, the expansion/selection/loading state,
//! the roving focus, the loader, and the observers. Every interaction runs to
//! completion synchronously; subtree loads finish later and are merged when
//! the view pumps its completion queue.
//!
//! # Examples
//!
//! ```ignore
//! use arbor::prelude::*;
//!
//! let mut view = TreeView::builder(vec![
//!     TreeNode::new("docs", "Documents").with_children(vec![TreeNode::new("cv", "cv.pdf")]),
//!     TreeNode::lazy("photos", "Photos"),
//! ])
//! .with_config(TreeConfig::new().with_label("Files"))
//! .with_loader(|id: &NodeId, done: LoadCompletion| spawn_fetch(id.clone(), done))
//! .observe(|n: &Notification| println!("{n:?}"))
//! .build();
//!
//! view.handle_key(KeyEvent::plain(Key::Down));
//! view.handle_key(KeyEvent::plain(Key::Right)); // requests "photos"
//! ```

use crate::config::TreeConfig;
use crate::controller::{self, ExpansionChange};
use crate::error::TreeError;
use crate::event::{KeyEvent, KeyMap, NavAction, Notification, Observers};
use crate::focus::FocusNavigator;
use crate::lazy::{ChildLoader, LoadCoordinator, LoadResult, LoadState, NoLoader};
use crate::model::{NodeId, NodeRef, Tree, TreeNode};
use crate::render::access::{self, AccessNode};
use crate::render::outline::{self, OutlineRow};
use crate::state::{ExpansionState, SelectionMode, SelectionState};
use crate::visible::{flatten, VisibleNode};

// ---------------------------------------------------------------------------
// TreeViewBuilder
// ---------------------------------------------------------------------------

/// Builder for [`TreeView`]: roots, config, loader, observers.
pub struct TreeViewBuilder {
    roots: Vec<TreeNode>,
    config: TreeConfig,
    loader: Box<dyn ChildLoader>,
    observers: Observers,
}

impl TreeViewBuilder {
    /// Replace the configuration.
    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the data source for lazy nodes.
    pub fn with_loader(mut self, loader: impl ChildLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Register an observer for toggle, selection, and load notifications.
    pub fn observe(mut self, observer: impl FnMut(&Notification) + 'static) -> Self {
        self.observers.register(observer);
        self
    }

    /// Build the view. Lazy nodes listed as initially expanded are requested.
    ///
    /// Observers only see changes made after construction; loads answered
    /// synchronously here are part of the initial state.
    pub fn build(self) -> TreeView {
        let TreeConfig {
            selection_mode,
            label,
            expanded,
            keymap,
        } = self.config;
        let tree = Tree::new(self.roots);

        let mut expansion = ExpansionState::new();
        let mut to_load = Vec::new();
        for id in expanded {
            match tree.find_by_id(id.as_str()) {
                Some(node) if node.has_children => {
                    if node.needs_load() {
                        to_load.push(node.id.clone());
                    }
                    expansion.insert(node.id.clone());
                }
                _ => log::debug!("initial expansion of `{id}` ignored"),
            }
        }

        let mut view = TreeView {
            tree,
            expansion,
            selection: SelectionState::new(selection_mode),
            loads: LoadCoordinator::new(),
            focus: FocusNavigator::new(),
            visible: Vec::new(),
            loader: self.loader,
            observers: Observers::new(),
            keymap,
            label,
            dirty: true,
        };
        view.refresh_visible();
        for id in to_load {
            view.loads.request(&id, view.loader.as_mut());
        }
        view.process_loads();
        view.observers = self.observers;
        view
    }
}

impl std::fmt::Debug for TreeViewBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeViewBuilder")
            .field("roots", &self.roots.len())
            .field("config", &self.config)
            .field("observers", &self.observers)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TreeView
// ---------------------------------------------------------------------------

/// A hierarchical disclosure/selection tree.
pub struct TreeView {
    tree: Tree,
    expansion: ExpansionState,
    selection: SelectionState,
    loads: LoadCoordinator,
    focus: FocusNavigator,
    /// Flattened visible nodes (rebuilt whenever the tree or expansion changes).
    visible: Vec<VisibleNode>,
    loader: Box<dyn ChildLoader>,
    observers: Observers,
    keymap: KeyMap,
    label: Option<String>,
    /// Set when something a renderer shows has changed.
    dirty: bool,
}

impl TreeView {
    /// Start building a view over `roots`.
    pub fn builder(roots: Vec<TreeNode>) -> TreeViewBuilder {
        TreeViewBuilder {
            roots,
            config: TreeConfig::default(),
            loader: Box::new(NoLoader),
            observers: Observers::new(),
        }
    }

    /// Create a view with no loader and no observers.
    pub fn new(roots: Vec<TreeNode>, config: TreeConfig) -> Self {
        Self::builder(roots).with_config(config).build()
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// The current tree value.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Find a node anywhere in the tree.
    pub fn node(&self, id: &str) -> Option<&NodeRef> {
        self.tree.find_by_id(id)
    }

    /// Visible nodes in display order.
    pub fn visible(&self) -> &[VisibleNode] {
        &self.visible
    }

    /// Ids of visible nodes in display order.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.visible.iter().map(|row| row.id().clone()).collect()
    }

    /// The expansion set.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Check if a node is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.contains(id)
    }

    /// The selection set.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.selection.ids()
    }

    /// Check if a node is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Whether a load for `id` is in flight.
    pub fn is_loading(&self, id: &str) -> bool {
        self.loads.is_loading(id)
    }

    /// Ids with a load in flight, sorted.
    pub fn loading_ids(&self) -> Vec<NodeId> {
        self.loads.loading_ids()
    }

    /// Load state of `id`.
    pub fn load_state(&self, id: &str) -> LoadState {
        self.loads.state(id)
    }

    /// The node holding keyboard focus.
    pub fn active_id(&self) -> Option<&NodeId> {
        self.focus.active()
    }

    /// Index of the focused node in [`visible`](Self::visible).
    pub fn active_index(&self) -> Option<usize> {
        self.focus.active_index(&self.visible)
    }

    /// Accessible name of the tree.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The key map in use.
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Open or close `id`. Unknown, disabled, and childless nodes are ignored.
    pub fn toggle_expansion(&mut self, id: &str) {
        if let Err(err) = self.try_toggle_expansion(id) {
            log::debug!("toggle_expansion ignored: {err}");
        }
    }

    /// Open or close `id`, reporting why nothing happened.
    ///
    /// Returns whether the node is open afterwards. Opening a node whose
    /// children are missing requests them; the node shows as loading until
    /// they arrive. A loader that answers at once with no children closes the
    /// node again before this returns.
    pub fn try_toggle_expansion(&mut self, id: &str) -> Result<bool, TreeError> {
        let change = controller::toggle_expansion(&self.tree, &mut self.expansion, id)?;
        let node_id = self
            .tree
            .find_by_id(id)
            .map(|node| node.id.clone())
            .unwrap_or_else(|| NodeId::from(id));

        if let ExpansionChange::Expanded { needs_load: true } = change {
            self.loads.request(&node_id, self.loader.as_mut());
        }
        self.refresh_visible();
        self.observers.emit(Notification::Toggle {
            node_id: node_id.clone(),
            expanded: change.is_expanded(),
        });
        // A loader may have answered synchronously.
        self.process_loads();
        Ok(self.expansion.contains(node_id.as_str()))
    }

    /// Open `id` if it is closed.
    pub fn expand(&mut self, id: &str) {
        if !self.is_expanded(id) {
            self.toggle_expansion(id);
        }
    }

    /// Close `id` if it is open.
    pub fn collapse(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.toggle_expansion(id);
        }
    }

    /// Close every node, notifying once per node closed.
    pub fn collapse_all(&mut self) {
        let closed = self.expansion.clear();
        if closed.is_empty() {
            return;
        }
        self.refresh_visible();
        for node_id in closed {
            self.observers.emit(Notification::Toggle {
                node_id,
                expanded: false,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Apply a selection toggle to `id`. Unknown and disabled nodes are ignored.
    pub fn toggle_selection(&mut self, id: &str) {
        if let Err(err) = self.try_toggle_selection(id) {
            log::debug!("toggle_selection ignored: {err}");
        }
    }

    /// Apply a selection toggle to `id`, reporting why nothing happened.
    ///
    /// Returns whether the selection set changed. Observers are notified
    /// either way.
    pub fn try_toggle_selection(&mut self, id: &str) -> Result<bool, TreeError> {
        let changed = controller::toggle_selection(&self.tree, &mut self.selection, id)?;
        if changed {
            self.dirty = true;
        }
        let node_id = self
            .tree
            .find_by_id(id)
            .map(|node| node.id.clone())
            .unwrap_or_else(|| NodeId::from(id));
        self.observers.emit(Notification::Selection {
            node_id,
            selected_ids: self.selection.ids(),
        });
        Ok(changed)
    }

    /// Pointer activation: focus `id` if visible, then toggle its selection.
    pub fn click(&mut self, id: &str) {
        if self.focus.focus(&self.visible, id) {
            self.dirty = true;
        }
        self.toggle_selection(id);
    }

    // -------------------------------------------------------------------------
    // Focus and keys
    // -------------------------------------------------------------------------

    /// Move focus to `id` if it is visible. Returns whether focus moved.
    pub fn focus(&mut self, id: &str) -> bool {
        let moved = self.focus.focus(&self.visible, id);
        self.dirty |= moved;
        moved
    }

    /// Handle a key press. Returns `true` if the key is bound (consumed),
    /// even when the action had nothing to do.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match self.keymap.resolve(&event) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// Handle a raw terminal event. Non-key events and key releases are ignored.
    pub fn handle_event(&mut self, event: &crossterm::event::Event) -> bool {
        KeyEvent::from_crossterm(event).is_some_and(|key| self.handle_key(key))
    }

    /// Run a navigation action against the focused node.
    pub fn apply(&mut self, action: NavAction) {
        let moved = match action {
            NavAction::Next => self.focus.move_next(&self.visible),
            NavAction::Previous => self.focus.move_previous(&self.visible),
            NavAction::First => self.focus.move_first(&self.visible),
            NavAction::Last => self.focus.move_last(&self.visible),
            NavAction::Expand => self.expand_active(),
            NavAction::Collapse => self.collapse_active(),
            NavAction::Activate => {
                if let Some(id) = self.focus.active().cloned() {
                    self.toggle_selection(id.as_str());
                }
                false
            }
        };
        self.dirty |= moved;
    }

    /// Expand-direction key: open a closed node, or step into an open one.
    fn expand_active(&mut self) -> bool {
        let Some(row) = self.active_row() else {
            return false;
        };
        let (id, expanded, disclosable) = (row.id().clone(), row.expanded, row.is_disclosable());
        if expanded {
            self.focus.move_to_first_child(&self.visible)
        } else {
            if disclosable {
                self.toggle_expansion(id.as_str());
            }
            false
        }
    }

    /// Collapse-direction key: close an open node, or step out to the parent.
    /// A node that cannot be closed (disabled) steps out as well.
    fn collapse_active(&mut self) -> bool {
        let Some(row) = self.active_row() else {
            return false;
        };
        let (id, expanded) = (row.id().clone(), row.expanded);
        if expanded {
            match self.try_toggle_expansion(id.as_str()) {
                Ok(_) => return false,
                Err(err) => log::debug!("collapse ignored: {err}"),
            }
        }
        self.focus.move_to_parent(&self.visible)
    }

    fn active_row(&self) -> Option<&VisibleNode> {
        self.active_index().map(|index| &self.visible[index])
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Merge every load completion delivered so far. Returns how many changed
    /// the tree.
    ///
    /// Interaction methods call this themselves; hosts whose loaders resolve
    /// from other threads call it from their event loop.
    pub fn process_loads(&mut self) -> usize {
        let mut changed = 0;
        for result in self.loads.drain() {
            if self.merge(result) {
                changed += 1;
            }
        }
        changed
    }

    /// Wait for the next load completion and merge it, along with anything
    /// else already delivered. Returns `false` at once if nothing is in flight.
    pub async fn next_load(&mut self) -> bool {
        if self.loads.pending_count() == 0 {
            return false;
        }
        let result = self.loads.next().await;
        let changed = self.merge(result);
        self.process_loads();
        changed
    }

    /// Merge one completion. Returns whether the tree changed.
    fn merge(&mut self, result: LoadResult) -> bool {
        let LoadResult {
            node_id, children, ..
        } = result;
        let Some(node) = self.tree.find_by_id(node_id.as_str()) else {
            log::debug!("children for unknown node `{node_id}` discarded");
            return false;
        };
        let empty = children.is_empty();
        if node.children.same_ids(&children) && node.has_children != empty {
            log::debug!("children of `{node_id}` unchanged");
            return false;
        }

        let child_count = children.len();
        self.tree = self.tree.replace_children(node_id.as_str(), children);
        // A node without children cannot stay open.
        let closed = empty && self.expansion.remove(node_id.as_str());
        self.refresh_visible();

        self.observers.emit(Notification::Loaded {
            node_id: node_id.clone(),
            child_count,
        });
        if closed {
            self.observers.emit(Notification::Toggle {
                node_id,
                expanded: false,
            });
        }
        true
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Accessibility tree for the current state.
    pub fn accessibility_tree(&self) -> AccessNode {
        access::build(self)
    }

    /// Outline rows for the current state.
    pub fn outline_rows(&self) -> Vec<OutlineRow> {
        outline::rows(self)
    }

    /// Plain-text outline of the visible nodes.
    pub fn outline(&self) -> String {
        outline::render(self)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if anything shown has changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (after rendering).
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Rebuild the visible list and re-home focus.
    fn refresh_visible(&mut self) {
        self.visible = flatten(&self.tree, &self.expansion);
        self.focus.reconcile(&self.tree, &self.visible);
        self.dirty = true;
    }
}

impl std::fmt::Debug for TreeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeView")
            .field("visible", &self.visible.len())
            .field("expansion", &self.expansion)
            .field("selection", &self.selection)
            .field("loads", &self.loads)
            .field("focus", &self.focus)
            .field("dirty", &self.dirty)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
