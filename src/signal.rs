use crate::{
    emitter::Stateful,
    notifier::{Listener, Notifier, SubscriptionId},
};
use std::{fmt, rc::Rc};

/// Presents every emission of a `Stateful` object as one uniform change signal.
///
/// Attaching is idempotent: all `Signal`s built around the same object share its `Notifier`,
/// and the object's own named listeners keep receiving their events unchanged.
pub struct Signal<E: Stateful> {
    emitter: Rc<E>,
    notifier: Rc<Notifier>,
}

impl<E: Stateful> Signal<E> {
    pub fn attach(emitter: Rc<E>) -> Self {
        let notifier = emitter.events().notifier();

        Self { emitter, notifier }
    }

    pub fn subscribe(&self, listener: Rc<dyn Listener>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn state(&self) -> E::State {
        self.emitter.state()
    }

    pub fn emitter(&self) -> &Rc<E> {
        &self.emitter
    }

    pub fn notifier(&self) -> &Rc<Notifier> {
        &self.notifier
    }
}

impl<E: Stateful> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            emitter: self.emitter.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<E: Stateful> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
