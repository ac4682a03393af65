//! Loader trait and the single-use completion handle passed to it.

use std::fmt;

use slotmap::new_key_type;
use tokio::sync::mpsc::UnboundedSender;

use crate::model::{NodeId, TreeNode};

new_key_type! {
    /// Ticket for one in-flight load request.
    pub struct LoadKey;
}

// ---------------------------------------------------------------------------
// LoadResult
// ---------------------------------------------------------------------------

/// Children delivered for a request, waiting to be merged.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Ticket issued when the request was made.
    pub key: LoadKey,
    /// The node the children belong to.
    pub node_id: NodeId,
    /// Ordered children; empty means the node has none.
    pub children: Vec<TreeNode>,
}

// ---------------------------------------------------------------------------
// LoadCompletion
// ---------------------------------------------------------------------------

/// One-shot handle a loader must resolve exactly once.
///
/// `resolve` consumes the handle. Dropping it unresolved leaves the node in
/// its loading state for good; a warning is logged when that happens.
pub struct LoadCompletion {
    key: LoadKey,
    node_id: NodeId,
    sender: Option<UnboundedSender<LoadResult>>,
}

impl LoadCompletion {
    pub(crate) fn new(key: LoadKey, node_id: NodeId, sender: UnboundedSender<LoadResult>) -> Self {
        Self {
            key,
            node_id,
            sender: Some(sender),
        }
    }

    /// The node whose children are requested.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Deliver the node's children.
    ///
    /// Safe to call from any thread. If the widget is gone the result is
    /// discarded.
    pub fn resolve(mut self, children: Vec<TreeNode>) {
        let Some(sender) = self.sender.take() else {
            return;
        };
        let result = LoadResult {
            key: self.key,
            node_id: self.node_id.clone(),
            children,
        };
        if sender.send(result).is_err() {
            log::debug!("load for `{}` resolved after the tree was dropped", self.node_id);
        }
    }
}

impl fmt::Debug for LoadCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadCompletion")
            .field("key", &self.key)
            .field("node_id", &self.node_id)
            .field("resolved", &self.sender.is_none())
            .finish()
    }
}

impl Drop for LoadCompletion {
    fn drop(&mut self) {
        if self.sender.is_some() {
            log::warn!(
                "load completion for `{}` dropped unresolved; node stays loading",
                self.node_id
            );
        }
    }
}

// ---------------------------------------------------------------------------
// ChildLoader
// ---------------------------------------------------------------------------

/// External data source answering "give me the children of node X".
///
/// `request` must return promptly; the answer is delivered later through the
/// completion handle, from any thread or task.
pub trait ChildLoader {
    /// Start fetching the children of `node_id`.
    fn request(&mut self, node_id: &NodeId, completion: LoadCompletion);
}

impl<F> ChildLoader for F
where
    F: FnMut(&NodeId, LoadCompletion),
{
    fn request(&mut self, node_id: &NodeId, completion: LoadCompletion) {
        self(node_id, completion)
    }
}

/// Loader for trees that are fully populated up front.
///
/// Drops every request, so a lazy node under it stays loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl ChildLoader for NoLoader {
    fn request(&mut self, node_id: &NodeId, completion: LoadCompletion) {
        log::debug!("no loader installed; request for `{node_id}` is never answered");
        drop(completion);
    }
}
