//! Outward notifications and the observer list that receives them.
//!
//! Observers are plain closures registered when the tree is built. Every
//! notification carries the state *after* the operation that produced it.

use std::fmt;

use crate::model::NodeId;

/// A state change reported to the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A node was opened or closed.
    Toggle { node_id: NodeId, expanded: bool },
    /// The selection changed because of `node_id`.
    Selection {
        node_id: NodeId,
        selected_ids: Vec<NodeId>,
    },
    /// Children for `node_id` were merged into the tree.
    Loaded { node_id: NodeId, child_count: usize },
}

impl Notification {
    /// The node the notification is about.
    pub fn node_id(&self) -> &NodeId {
        match self {
            Notification::Toggle { node_id, .. }
            | Notification::Selection { node_id, .. }
            | Notification::Loaded { node_id, .. } => node_id,
        }
    }
}

/// Callback invoked for every notification.
pub type Observer = Box<dyn FnMut(&Notification)>;

/// Ordered list of observers.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Observer>,
}

impl Observers {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers run in registration order.
    pub fn register(&mut self, observer: impl FnMut(&Notification) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver `notification` to every observer.
    pub fn emit(&mut self, notification: Notification) {
        log::trace!("notify {notification:?}");
        for observer in &mut self.observers {
            observer(&notification);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_observers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        let first = Rc::clone(&seen);
        observers.register(move |n| first.borrow_mut().push(("first", n.clone())));
        let second = Rc::clone(&seen);
        observers.register(move |n| second.borrow_mut().push(("second", n.clone())));
        assert_eq!(observers.len(), 2);

        let toggle = Notification::Toggle {
            node_id: NodeId::from("a"),
            expanded: true,
        };
        observers.emit(toggle.clone());
        assert_eq!(
            *seen.borrow(),
            vec![("first", toggle.clone()), ("second", toggle)]
        );
    }

    #[test]
    fn emit_without_observers_is_fine() {
        let mut observers = Observers::new();
        assert!(observers.is_empty());
        observers.emit(Notification::Loaded {
            node_id: NodeId::from("b"),
            child_count: 0,
        });
    }

    #[test]
    fn node_id_accessor() {
        let n = Notification::Selection {
            node_id: NodeId::from("a2"),
            selected_ids: vec![NodeId::from("a2")],
        };
        assert_eq!(n.node_id(), "a2");
    }
}
