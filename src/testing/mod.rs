//! Headless testing helpers: Pilot, recording loaders, notification log.
//!
//! Use the [`Pilot`] to drive a [`TreeView`](crate::view::TreeView) with key
//! presses and clicks, answer its loads by hand, and capture its rendered
//! output as plain text for snapshot-style assertions.

pub mod loader;
pub mod pilot;
pub mod recorder;

pub use loader::{PendingLoads, RecordingLoader, StaticLoader};
pub use pilot::Pilot;
pub use recorder::NotificationLog;
