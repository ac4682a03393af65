//! Lazy loading: loader contract, one-shot completion handles, per-node request state.
//!
//! A [`ChildLoader`] receives a node id and a [`LoadCompletion`]. Resolving the
//! completion sends the children back over a channel owned by the
//! [`LoadCoordinator`], which the widget drains on its own thread.

pub mod completion;
pub mod coordinator;

pub use completion::{ChildLoader, LoadCompletion, LoadKey, LoadResult, NoLoader};
pub use coordinator::{LoadCoordinator, LoadState};
