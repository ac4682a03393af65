//! Pilot: programmatic interaction with a headless TreeView.
//!
//! The `Pilot` wraps a [`TreeView`] wired to a [`RecordingLoader`] and a
//! [`NotificationLog`], and provides methods to simulate user input, answer
//! loads, and render the view to text for snapshot testing.

use crate::config::TreeConfig;
use crate::event::{Key, KeyEvent, Modifiers, Notification};
use crate::model::{NodeId, TreeNode};
use crate::testing::loader::{PendingLoads, RecordingLoader};
use crate::testing::recorder::NotificationLog;
use crate::view::TreeView;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless tree driver for testing.
///
/// # Examples
///
/// ```ignore
/// use arbor::testing::Pilot;
/// use arbor::event::Key;
///
/// let mut pilot = Pilot::new(vec![TreeNode::lazy("b", "B")]);
/// pilot.press(Key::Right);
/// assert_eq!(pilot.pending().requested_ids(), vec![NodeId::from("b")]);
/// pilot.resolve("b", vec![TreeNode::new("b1", "B1")]);
/// ```
pub struct Pilot {
    view: TreeView,
    pending: PendingLoads,
    log: NotificationLog,
}

impl Pilot {
    /// Create a pilot over `roots` with the default config.
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self::with_config(roots, TreeConfig::default())
    }

    /// Create a pilot over `roots` with `config`.
    pub fn with_config(roots: Vec<TreeNode>, config: TreeConfig) -> Self {
        let (loader, pending) = RecordingLoader::new();
        let log = NotificationLog::new();
        let view = TreeView::builder(roots)
            .with_config(config)
            .with_loader(loader)
            .observe(log.observer())
            .build();
        Self { view, pending, log }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers. Returns whether it was bound.
    pub fn press(&mut self, key: Key) -> bool {
        self.view.handle_key(KeyEvent::plain(key))
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.view.handle_key(KeyEvent::new(key, modifiers))
    }

    /// Simulate a sequence of plain key presses.
    pub fn press_all(&mut self, keys: &[Key]) {
        for key in keys {
            self.press(*key);
        }
    }

    /// Simulate a pointer click on `id`.
    pub fn click(&mut self, id: &str) {
        self.view.click(id);
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Answer the oldest held request for `id` and merge the result.
    pub fn resolve(&mut self, id: &str, children: Vec<TreeNode>) -> bool {
        let answered = self.pending.resolve(id, children);
        self.view.process_loads();
        answered
    }

    /// Handle onto unanswered load requests.
    pub fn pending(&self) -> &PendingLoads {
        &self.pending
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying view.
    pub fn view(&self) -> &TreeView {
        &self.view
    }

    /// Borrow the underlying view mutably.
    pub fn view_mut(&mut self) -> &mut TreeView {
        &mut self.view
    }

    /// The focused node id.
    pub fn active(&self) -> Option<&str> {
        self.view.active_id().map(NodeId::as_str)
    }

    /// Visible ids in display order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.view
            .visible()
            .iter()
            .map(|row| row.id().to_string())
            .collect()
    }

    /// Every notification delivered so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.entries()
    }

    /// Take delivered notifications, leaving the log empty.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.log.take()
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Plain-text outline of the view.
    pub fn outline(&self) -> String {
        self.view.outline()
    }

    /// Indented dump of the accessibility tree.
    pub fn a11y(&self) -> String {
        self.view.accessibility_tree().to_string()
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot")
            .field("view", &self.view)
            .field("pending", &self.pending.count())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> Vec<TreeNode> {
        vec![
            TreeNode::new("a", "Alpha")
                .with_children(vec![TreeNode::new("a1", "One"), TreeNode::new("a2", "Two")]),
            TreeNode::lazy("b", "Beta"),
        ]
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_focuses_first_row() {
        let pilot = Pilot::new(roots());
        assert_eq!(pilot.active(), Some("a"));
        assert_eq!(pilot.visible_ids(), vec!["a", "b"]);
        assert!(pilot.notifications().is_empty());
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn unbound_key_is_ignored() {
        let mut pilot = Pilot::new(roots());
        assert!(!pilot.press(Key::Char('x')));
        assert!(!pilot.press_with(Key::Down, Modifiers::CTRL));
        assert!(pilot.press(Key::Down));
        assert_eq!(pilot.active(), Some("b"));
    }

    #[test]
    fn press_all_runs_in_order() {
        let mut pilot = Pilot::new(roots());
        pilot.press_all(&[Key::Right, Key::Right, Key::Down]);
        assert_eq!(pilot.active(), Some("a2"));
    }

    // ── Loading ──────────────────────────────────────────────────────

    #[test]
    fn resolve_merges_children() {
        let mut pilot = Pilot::new(roots());
        pilot.press_all(&[Key::End, Key::Right]);
        assert!(pilot.view().is_loading("b"));
        assert!(pilot.resolve("b", vec![TreeNode::new("b1", "B1")]));
        assert!(!pilot.view().is_loading("b"));
        assert_eq!(pilot.visible_ids(), vec!["a", "b", "b1"]);
        assert!(!pilot.resolve("b", Vec::new()));
    }
}
