//! Renderers: accessibility tree and text outline.
//!
//! Both read the view's flattened visible list, so they always show the same
//! nodes in the same order.

pub mod access;
pub mod outline;

pub use access::{AccessNode, Role};
pub use outline::{Disclosure, OutlineRow};
