use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the asynchronous waits of a `StateWaiter`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The timeout elapsed before the target state was observed
    #[error("timed out after {0:?} waiting for the target state")]
    Timeout(Duration),
    /// The pending wait was torn down (or its emitter dropped) before it matched
    #[error("waiter was destroyed before the target state was reached")]
    Destroyed,
}

pub type Result<T> = std::result::Result<T, Error>;
