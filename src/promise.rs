use crate::{
    cancel::CancelOnDrop,
    emitter::Stateful,
    error::{Error, Result},
    waiter::StateWaiter,
};
use async_trait::async_trait;
use futures::{channel::oneshot, FutureExt};
use std::{rc::Rc, time::Duration};
use tracing::debug;

/// Waits on a target state as a single-resolution future.
#[async_trait(?Send)]
pub trait Promised {
    type Emitter: Stateful;

    /// Resolves with the wrapped object once its state matches `target`.
    ///
    /// `timeout` overrides the configured default timeout; a zero duration disables the timer.
    /// On `Error::Timeout`, or if the future is dropped early, the pending wait is cancelled and
    /// its callback never runs. Resolving removes only this wait, never the waiter's others.
    async fn promised(
        &self,
        target: <Self::Emitter as Stateful>::State,
        timeout: Option<Duration>,
    ) -> Result<Rc<Self::Emitter>>;

    async fn promised_within(
        &self,
        target: <Self::Emitter as Stateful>::State,
        timeout: Duration,
    ) -> Result<Rc<Self::Emitter>> {
        self.promised(target, Some(timeout)).await
    }
}

#[async_trait(?Send)]
impl<E: Stateful> Promised for StateWaiter<E> {
    type Emitter = E;

    async fn promised(&self, target: E::State, timeout: Option<Duration>) -> Result<Rc<E>> {
        let (sender, receiver) = oneshot::channel();
        let _cancel = self
            .register(
                target,
                Box::new(move |_, emitter: &Rc<E>| {
                    // the receiving side may already have timed out
                    let _ = sender.send(emitter.clone());
                }),
            )
            .map(CancelOnDrop::from);

        // the sender is dropped unsent when teardown removes the wait
        let resolved = receiver.map(|result| result.map_err(|_| Error::Destroyed));

        let timeout = timeout
            .or(self.options().default_timeout)
            .filter(|limit| !limit.is_zero());

        match timeout {
            None => resolved.await,
            Some(limit) => match tokio::time::timeout(limit, resolved).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(?limit, "timed out waiting for target state");

                    Err(Error::Timeout(limit))
                }
            },
        }
    }
}
