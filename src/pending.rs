use crate::{
    emitter::Stateful,
    matcher::Matcher,
    notifier::{Flow, Listener},
};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};
use tracing::debug;

pub(crate) type Callback<E> = Box<dyn FnOnce(<E as Stateful>::State, &Rc<E>)>;

/// One outstanding wait for a target state, held by the notifier until it matches
pub(crate) struct PendingWait<E: Stateful> {
    emitter: Weak<E>,
    target: E::State,
    matcher: Matcher<E::State>,
    callback: RefCell<Option<Callback<E>>>,
    cancelled: Rc<Cell<bool>>,
}

impl<E: Stateful> PendingWait<E> {
    pub(crate) fn new(
        emitter: &Rc<E>,
        target: E::State,
        matcher: Matcher<E::State>,
        callback: Callback<E>,
        cancelled: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            emitter: Rc::downgrade(emitter),
            target,
            matcher,
            callback: RefCell::new(Some(callback)),
            cancelled,
        }
    }
}

impl<E: Stateful> Listener for PendingWait<E> {
    fn on_change(&self) -> Flow {
        // an emission from inside the callback re-enters here after the callback was taken
        if self.cancelled.get() || self.callback.borrow().is_none() {
            return Flow::Remove;
        }

        let emitter = match self.emitter.upgrade() {
            Some(emitter) => emitter,
            None => return Flow::Remove,
        };

        let observed = emitter.state();

        if !self.matcher.matches(&self.target, &observed) {
            return Flow::Keep;
        }

        let callback = self.callback.borrow_mut().take();

        if let Some(callback) = callback {
            debug!("pending wait reached its target state");
            callback(observed, &emitter);
        }

        Flow::Remove
    }
}
