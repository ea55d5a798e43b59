//! Wait for the state of any event-emitting object to satisfy a predicate, either through a
//! one-shot callback (`StateWaiter::in_state`) or a future with an optional timeout
//! (`Promised::promised`).
//!
//! Wrapped objects implement `Stateful`: they report their state and own an `EventEmitter`.
//! Every emission, whatever the event name, is treated as a possible state change.
//!
//! Everything here is single-threaded: callbacks run synchronously inside `EventEmitter::emit`,
//! and the futures are `!Send`. Timeouts need a Tokio runtime with the time driver enabled.
mod cancel;
mod emitter;
mod error;
mod matcher;
mod notifier;
mod options;
mod pending;
mod promise;
mod signal;
mod waiter;

pub use emitter::{EventEmitter, ListenerId, Stateful};
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use notifier::{Flow, Listener, Notifier, SubscriptionId};
pub use options::{Options, Teardown};
pub use promise::Promised;
pub use signal::Signal;
pub use waiter::StateWaiter;
