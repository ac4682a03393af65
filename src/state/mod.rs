//! Derived state sets: expanded ids and selected ids.

pub mod expansion;
pub mod selection;

pub use expansion::ExpansionState;
pub use selection::{SelectionMode, SelectionState};
