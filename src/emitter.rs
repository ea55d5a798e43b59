use crate::notifier::Notifier;
use std::{
    cell::{Cell, OnceCell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::debug;

/// The contract a wrapped object fulfils: it reports its state and owns an `EventEmitter`
/// through which it announces changes.
pub trait Stateful: 'static {
    /// Any semantic value: a primitive, an `enum`, a record
    type State: 'static;
    /// Payload delivered with each named event
    type Event: 'static;

    /// Reads the current state. Expected to be cheap and synchronous.
    fn state(&self) -> Self::State;

    fn events(&self) -> &EventEmitter<Self::Event>;
}

/// Identifies a listener registered with `EventEmitter::on`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler<A> = Rc<dyn Fn(&A)>;

/// A registry of listeners keyed by event name.
///
/// Every call to `emit`, whatever the name, also fires the unified change `Notifier` once one
/// has been attached.
pub struct EventEmitter<A = ()> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, String, Handler<A>)>>,
    notifier: OnceCell<Rc<Notifier>>,
}

impl<A> Default for EventEmitter<A> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            notifier: OnceCell::new(),
        }
    }
}

impl<A> EventEmitter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, event: impl Into<String>, handler: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, event.into(), Rc::new(handler)));

        id
    }

    pub fn off(&self, id: ListenerId) -> bool {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(existing, _, _)| *existing == id)
                .map(|index| listeners.remove(index))
        };

        removed.is_some()
    }

    /// Deliver `payload` to every listener of `event`, then fire the change notifier.
    /// Returns whether any named listener was registered for `event`.
    pub fn emit(&self, event: &str, payload: &A) -> bool {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            handler(payload);
        }

        if let Some(notifier) = self.notifier.get() {
            notifier.notify();
        }

        !handlers.is_empty()
    }

    /// Removes every named listener. The change notifier stays attached.
    pub fn remove_all_listeners(&self) {
        let removed = std::mem::take(&mut *self.listeners.borrow_mut());
        debug!(removed = removed.len(), "removed all emitter listeners");
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }

    /// The change notifier for this emitter, attached on first use
    pub fn notifier(&self) -> Rc<Notifier> {
        self.notifier
            .get_or_init(|| {
                debug!("attaching change notifier");
                Rc::new(Notifier::default())
            })
            .clone()
    }
}

impl<A> fmt::Debug for EventEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .field("notifier", &self.notifier.get())
            .finish()
    }
}
