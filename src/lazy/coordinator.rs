//! LoadCoordinator: per-node `Idle → Requested → Resolved` state machine.

use std::collections::HashMap;

use slotmap::SlotMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::completion::{ChildLoader, LoadCompletion, LoadKey, LoadResult};
use crate::model::NodeId;

/// Load state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No request has been made.
    #[default]
    Idle,
    /// A request is in flight.
    Requested,
    /// Children have been delivered at least once.
    Resolved,
}

/// Issues load requests and collects their completions.
///
/// Holds both ends of the completion channel, so the receiver never reports
/// closed while the coordinator is alive.
pub struct LoadCoordinator {
    states: HashMap<NodeId, LoadState>,
    in_flight: SlotMap<LoadKey, NodeId>,
    sender: UnboundedSender<LoadResult>,
    receiver: UnboundedReceiver<LoadResult>,
}

impl LoadCoordinator {
    /// Create a coordinator with no requests.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            states: HashMap::new(),
            in_flight: SlotMap::with_key(),
            sender,
            receiver,
        }
    }

    /// Current state of `id`.
    pub fn state(&self, id: &str) -> LoadState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Whether a request for `id` is in flight.
    pub fn is_loading(&self, id: &str) -> bool {
        self.state(id) == LoadState::Requested
    }

    /// Ids with a request in flight, sorted.
    pub fn loading_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.in_flight.values().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of requests in flight.
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Ask `loader` for the children of `id`.
    ///
    /// Returns `false` without calling the loader if a request for `id` is
    /// already in flight.
    pub fn request(&mut self, id: &NodeId, loader: &mut dyn ChildLoader) -> bool {
        if self.is_loading(id.as_str()) {
            log::debug!("load for `{id}` already in flight; request suppressed");
            return false;
        }
        let key = self.in_flight.insert(id.clone());
        self.states.insert(id.clone(), LoadState::Requested);
        log::debug!("requesting children of `{id}`");
        loader.request(id, LoadCompletion::new(key, id.clone(), self.sender.clone()));
        true
    }

    /// Take every completion delivered so far, without waiting.
    ///
    /// Completions for unknown tickets are discarded.
    pub fn drain(&mut self) -> Vec<LoadResult> {
        let mut ready = Vec::new();
        while let Ok(result) = self.receiver.try_recv() {
            if self.settle(&result) {
                ready.push(result);
            }
        }
        ready
    }

    /// Wait for the next completion.
    ///
    /// Pending forever if no request is in flight or a loader never resolves.
    pub async fn next(&mut self) -> LoadResult {
        loop {
            // The coordinator keeps a sender, so `recv` only yields `Some`.
            if let Some(result) = self.receiver.recv().await {
                if self.settle(&result) {
                    return result;
                }
            }
        }
    }

    /// Retire the ticket for `result` and mark its node resolved.
    fn settle(&mut self, result: &LoadResult) -> bool {
        match self.in_flight.remove(result.key) {
            Some(node_id) => {
                log::debug!(
                    "children of `{node_id}` arrived ({} nodes)",
                    result.children.len()
                );
                self.states.insert(node_id, LoadState::Resolved);
                true
            }
            None => {
                log::trace!("ignoring completion for retired ticket ({})", result.node_id);
                false
            }
        }
    }
}

impl Default for LoadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCoordinator")
            .field("states", &self.states)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    /// Loader that keeps every completion for the test to resolve.
    #[derive(Default)]
    struct Held(Vec<LoadCompletion>);

    impl ChildLoader for Held {
        fn request(&mut self, _node_id: &NodeId, completion: LoadCompletion) {
            self.0.push(completion);
        }
    }

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn new_coordinator_is_idle() {
        let coord = LoadCoordinator::new();
        assert_eq!(coord.state("b"), LoadState::Idle);
        assert!(!coord.is_loading("b"));
        assert_eq!(coord.pending_count(), 0);
    }

    #[test]
    fn request_enters_requested() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        assert!(coord.request(&id("b"), &mut loader));
        assert_eq!(coord.state("b"), LoadState::Requested);
        assert_eq!(coord.loading_ids(), vec![id("b")]);
        assert_eq!(loader.0.len(), 1);
        assert_eq!(loader.0[0].node_id(), "b");
    }

    #[test]
    fn duplicate_request_is_suppressed() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        assert!(coord.request(&id("b"), &mut loader));
        assert!(!coord.request(&id("b"), &mut loader));
        assert_eq!(loader.0.len(), 1);
        assert_eq!(coord.pending_count(), 1);
    }

    #[test]
    fn distinct_nodes_load_concurrently() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        assert!(coord.request(&id("c"), &mut loader));
        assert!(coord.request(&id("b"), &mut loader));
        assert_eq!(coord.loading_ids(), vec![id("b"), id("c")]);
    }

    #[test]
    fn drain_resolves_and_clears_loading() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        coord.request(&id("b"), &mut loader);
        assert!(coord.drain().is_empty());

        loader.0.pop().unwrap().resolve(vec![TreeNode::new("b1", "B1")]);
        let ready = coord.drain();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].node_id, "b");
        assert_eq!(coord.state("b"), LoadState::Resolved);
        assert!(!coord.is_loading("b"));
        assert_eq!(coord.pending_count(), 0);
    }

    #[test]
    fn resolved_node_can_be_requested_again() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        coord.request(&id("b"), &mut loader);
        loader.0.pop().unwrap().resolve(Vec::new());
        coord.drain();
        assert!(coord.request(&id("b"), &mut loader));
        assert_eq!(coord.state("b"), LoadState::Requested);
    }

    #[test]
    fn unresolved_stays_requested() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        coord.request(&id("b"), &mut loader);
        drop(loader);
        assert!(coord.drain().is_empty());
        assert!(coord.is_loading("b"));
    }

    #[test]
    fn next_awaits_completion() {
        let mut coord = LoadCoordinator::new();
        let mut loader = Held::default();
        coord.request(&id("b"), &mut loader);
        let completion = loader.0.pop().unwrap();
        std::thread::spawn(move || completion.resolve(vec![TreeNode::new("b1", "B1")]));

        let result = tokio_test::block_on(coord.next());
        assert_eq!(result.node_id, "b");
        assert_eq!(coord.state("b"), LoadState::Resolved);
    }
}
