//! NotificationLog: an observer that keeps what it sees.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::Notification;

/// Shared record of delivered notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer closure appending to this log.
    pub fn observer(&self) -> impl FnMut(&Notification) + 'static {
        let entries = Rc::clone(&self.entries);
        move |n: &Notification| entries.borrow_mut().push(n.clone())
    }

    /// Everything recorded so far.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// Take the recorded notifications, leaving the log empty.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
