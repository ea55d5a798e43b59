use crate::{
    cancel::Cancel,
    emitter::Stateful,
    notifier::SubscriptionId,
    options::{Options, Teardown},
    pending::{Callback, PendingWait},
    signal::Signal,
};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::debug;

/// The subscriptions created through one `StateWaiter`, and whether it has been torn down
#[derive(Debug, Default)]
struct Lifecycle {
    subscriptions: RefCell<Vec<SubscriptionId>>,
    destroyed: Cell<bool>,
}

impl Lifecycle {
    fn track<E: Stateful>(&self, signal: &Signal<E>, id: SubscriptionId) {
        let mut subscriptions = self.subscriptions.borrow_mut();
        // waits that already matched have removed themselves
        subscriptions.retain(|existing| signal.notifier().is_subscribed(*existing));
        subscriptions.push(id);
    }

    fn teardown<E: Stateful>(&self, emitter: &E, scope: Teardown) {
        self.destroyed.set(true);

        let notifier = emitter.events().notifier();
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        let removed = subscriptions
            .into_iter()
            .filter(|id| notifier.unsubscribe(*id))
            .count();

        if scope == Teardown::Full {
            emitter.events().remove_all_listeners();
        }

        debug!(removed, ?scope, "destroyed state waiter");
    }
}

/// Waits for the state of a `Stateful` object to satisfy a `Matcher`, without polling.
///
/// A `StateWaiter` is cheap: any number of them can wrap the same object, and they all share
/// the object's change notifier.
pub struct StateWaiter<E: Stateful> {
    signal: Signal<E>,
    options: Options<E::State>,
    lifecycle: Rc<Lifecycle>,
}

impl<E> StateWaiter<E>
where
    E: Stateful,
    E::State: PartialEq,
{
    /// Wrap an object using exact equality and no default timeout
    pub fn wrap(emitter: Rc<E>) -> Self {
        Self::new(emitter, Options::default())
    }
}

impl<E: Stateful> StateWaiter<E> {
    pub fn new(emitter: Rc<E>, options: Options<E::State>) -> Self {
        Self {
            signal: Signal::attach(emitter),
            options,
            lifecycle: Rc::new(Lifecycle::default()),
        }
    }

    /// The live state of the wrapped object
    pub fn state(&self) -> E::State {
        self.signal.state()
    }

    pub fn emitter(&self) -> &Rc<E> {
        self.signal.emitter()
    }

    pub fn options(&self) -> &Options<E::State> {
        &self.options
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.destroyed.get()
    }

    /// Run `callback` once the state matches `target`.
    ///
    /// If it already matches, `callback` runs before this returns. Otherwise it runs exactly once,
    /// from inside the first emission after which the state matches. Returns a fresh
    /// `StateWaiter` over the same object (and options) for chaining.
    pub fn in_state<F>(&self, target: E::State, callback: F) -> Self
    where
        F: FnOnce(E::State, &Rc<E>) + 'static,
    {
        self.register(target, Box::new(callback));

        Self::new(self.emitter().clone(), self.options.clone())
    }

    /// Remove every subscription created through this waiter, widening to the wrapped object's
    /// own listeners when configured with `Teardown::Full`. The waiter is inert afterwards.
    pub fn destroy(&self) {
        self.lifecycle.teardown(self.emitter().as_ref(), self.options.teardown);
    }

    /// `destroy` with `Teardown::Full`, whatever the configured scope
    pub fn destroy_all(&self) {
        self.lifecycle.teardown(self.emitter().as_ref(), Teardown::Full);
    }

    /// `destroy` this waiter the first time the state matches `target`
    pub fn destroy_in_state(&self, target: E::State) {
        let lifecycle = self.lifecycle.clone();
        let scope = self.options.teardown;

        self.register(
            target,
            Box::new(move |_, emitter: &Rc<E>| lifecycle.teardown(emitter.as_ref(), scope)),
        );
    }

    /// Returns `None` when no wait is left pending: the callback already ran, or the waiter is
    /// destroyed and the callback was dropped unrun.
    pub(crate) fn register(&self, target: E::State, callback: Callback<E>) -> Option<Cancel> {
        let current = self.state();

        if self.options.matcher.matches(&target, &current) {
            debug!("target state already reached");
            callback(current, self.emitter());

            return None;
        }

        if self.is_destroyed() {
            debug!("discarding wait registered on a destroyed state waiter");

            return None;
        }

        let cancelled = Rc::new(Cell::new(false));
        let wait = PendingWait::new(
            self.emitter(),
            target,
            self.options.matcher.clone(),
            callback,
            cancelled.clone(),
        );
        let id = self.signal.subscribe(Rc::new(wait));
        self.lifecycle.track(&self.signal, id);
        debug!(?id, "registered pending wait");

        Some(Cancel::from(cancelled))
    }
}

impl<E: Stateful> Clone for StateWaiter<E> {
    /// Clones share the same subscriptions: destroying one destroys all of them
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
            options: self.options.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<E: Stateful> fmt::Debug for StateWaiter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateWaiter")
            .field("signal", &self.signal)
            .field("options", &self.options)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
