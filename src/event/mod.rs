//! Event system: key input, key map, outward notifications.

pub mod binding;
pub mod input;
pub mod notify;

pub use binding::{parse_binding, BindingError, KeyMap, NavAction};
pub use input::{Key, KeyEvent, Modifiers};
pub use notify::{Notification, Observer, Observers};
