use std::{cell::Cell, cell::RefCell, fmt, rc::Rc};
use tracing::trace;

/// Identifies a single subscription on a `Notifier`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// What a listener wants done with its subscription after a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Keep,
    Remove,
}

/// A subscriber to the unified "state may have changed" signal
pub trait Listener {
    fn on_change(&self) -> Flow;
}

impl<F> Listener for F
where
    F: Fn() -> Flow,
{
    fn on_change(&self) -> Flow {
        self()
    }
}

/// The unified change signal of one emitter. Listeners run in subscription order.
#[derive(Default)]
pub struct Notifier {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Listener>)>>,
}

impl Notifier {
    pub fn subscribe(&self, listener: Rc<dyn Listener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));

        id
    }

    /// Returns `false` if the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                // dropping a listener can re-enter the notifier
                let removed = listeners.remove(index);
                drop(listeners);
                drop(removed);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Run one notification pass over a snapshot of the current listeners.
    ///
    /// Listeners may subscribe, unsubscribe or emit again from inside `on_change`. Anything
    /// unsubscribed during the pass is skipped; anything subscribed during the pass first runs on
    /// the next notification.
    pub fn notify(&self) {
        let snapshot: Vec<_> = self.listeners.borrow().clone();
        trace!(listeners = snapshot.len(), "notifying state change");

        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }

            if listener.on_change() == Flow::Remove {
                self.unsubscribe(id);
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.len())
            .finish()
    }
}
