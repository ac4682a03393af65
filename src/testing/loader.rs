//! Loaders for tests: hold requests until the test resolves them, or answer
//! at once from a fixed table.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::lazy::{ChildLoader, LoadCompletion};
use crate::model::{NodeId, TreeNode};

// ---------------------------------------------------------------------------
// RecordingLoader
// ---------------------------------------------------------------------------

/// A loader that records every request and holds its completion handle.
///
/// The paired [`PendingLoads`] lets the test decide when (and whether) each
/// request is answered.
#[derive(Debug)]
pub struct RecordingLoader {
    pending: PendingLoads,
}

impl RecordingLoader {
    /// Create a loader and the handle used to answer its requests.
    pub fn new() -> (Self, PendingLoads) {
        let pending = PendingLoads::default();
        (
            Self {
                pending: pending.clone(),
            },
            pending,
        )
    }
}

impl ChildLoader for RecordingLoader {
    fn request(&mut self, node_id: &NodeId, completion: LoadCompletion) {
        let mut inner = self.pending.inner.borrow_mut();
        inner.history.push(node_id.clone());
        inner.held.push(completion);
    }
}

#[derive(Debug, Default)]
struct Held {
    history: Vec<NodeId>,
    held: Vec<LoadCompletion>,
}

/// Test-side handle onto a [`RecordingLoader`].
#[derive(Debug, Clone, Default)]
pub struct PendingLoads {
    inner: Rc<RefCell<Held>>,
}

impl PendingLoads {
    /// Every id ever requested, in request order.
    pub fn history(&self) -> Vec<NodeId> {
        self.inner.borrow().history.clone()
    }

    /// Ids whose requests have not been answered yet, in request order.
    pub fn requested_ids(&self) -> Vec<NodeId> {
        self.inner
            .borrow()
            .held
            .iter()
            .map(|c| c.node_id().clone())
            .collect()
    }

    /// Number of unanswered requests.
    pub fn count(&self) -> usize {
        self.inner.borrow().held.len()
    }

    /// Answer the oldest request for `id`. Returns `false` if none is held.
    pub fn resolve(&self, id: &str, children: Vec<TreeNode>) -> bool {
        let completion = {
            let mut inner = self.inner.borrow_mut();
            match inner.held.iter().position(|c| c.node_id() == id) {
                Some(index) => inner.held.remove(index),
                None => return false,
            }
        };
        completion.resolve(children);
        true
    }

    /// Drop the oldest request for `id` without answering it.
    pub fn abandon(&self, id: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.held.iter().position(|c| c.node_id() == id) {
            Some(index) => {
                inner.held.remove(index);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// StaticLoader
// ---------------------------------------------------------------------------

/// A loader that answers synchronously from a table. Unknown ids get no
/// children.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    table: HashMap<NodeId, Vec<TreeNode>>,
    requests: Rc<RefCell<Vec<NodeId>>>,
}

impl StaticLoader {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the children returned for `id` (builder).
    pub fn with(mut self, id: impl Into<NodeId>, children: Vec<TreeNode>) -> Self {
        self.table.insert(id.into(), children);
        self
    }

    /// Shared log of requested ids; clone it before handing the loader over.
    pub fn requests(&self) -> Rc<RefCell<Vec<NodeId>>> {
        Rc::clone(&self.requests)
    }
}

impl ChildLoader for StaticLoader {
    fn request(&mut self, node_id: &NodeId, completion: LoadCompletion) {
        self.requests.borrow_mut().push(node_id.clone());
        let children = self.table.get(node_id).cloned().unwrap_or_default();
        completion.resolve(children);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::LoadCoordinator;

    #[test]
    fn recording_loader_holds_until_resolved() {
        let (mut loader, pending) = RecordingLoader::new();
        let mut loads = LoadCoordinator::new();
        loads.request(&NodeId::from("b"), &mut loader);
        assert_eq!(pending.requested_ids(), vec![NodeId::from("b")]);
        assert!(loads.drain().is_empty());

        assert!(pending.resolve("b", vec![TreeNode::new("b1", "B1")]));
        assert_eq!(pending.count(), 0);
        assert_eq!(pending.history(), vec![NodeId::from("b")]);
        let ready = loads.drain();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].children[0].id, "b1");
    }

    #[test]
    fn resolve_unknown_returns_false() {
        let (_loader, pending) = RecordingLoader::new();
        assert!(!pending.resolve("zzz", Vec::new()));
        assert!(!pending.abandon("zzz"));
    }

    #[test]
    fn static_loader_answers_immediately() {
        let mut loader = StaticLoader::new().with("b", vec![TreeNode::new("b1", "B1")]);
        let requests = loader.requests();
        let mut loads = LoadCoordinator::new();
        loads.request(&NodeId::from("b"), &mut loader);
        loads.request(&NodeId::from("c"), &mut loader);

        let ready = loads.drain();
        assert_eq!(ready.len(), 2);
        assert_eq!(ready[0].children.len(), 1);
        assert!(ready[1].children.is_empty());
        assert_eq!(*requests.borrow(), vec![NodeId::from("b"), NodeId::from("c")]);
    }
}
