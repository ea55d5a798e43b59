use crate::matcher::Matcher;
use std::{fmt, time::Duration};

/// How far `StateWaiter::destroy` reaches when tearing down listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    /// Only the subscriptions created through the destroyed waiter
    Scoped,
    /// The waiter's subscriptions plus every named listener on the wrapped emitter, including
    /// listeners registered by unrelated code
    Full,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::Scoped
    }
}

/// Construction-time configuration for a `StateWaiter`
pub struct Options<S> {
    pub(crate) default_timeout: Option<Duration>,
    pub(crate) matcher: Matcher<S>,
    pub(crate) teardown: Teardown,
}

impl<S: PartialEq + 'static> Default for Options<S> {
    fn default() -> Self {
        Self::with_matcher(Matcher::equality())
    }
}

impl<S> Options<S> {
    /// Options for state types without (or with an unsuitable) `PartialEq`
    pub fn with_matcher(matcher: Matcher<S>) -> Self {
        Self {
            default_timeout: None,
            matcher,
            teardown: Teardown::default(),
        }
    }

    /// Timeout applied to `promised` calls that don't supply their own
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);

        self
    }

    pub fn matcher(mut self, matcher: Matcher<S>) -> Self {
        self.matcher = matcher;

        self
    }

    pub fn teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = teardown;

        self
    }
}

impl<S> Clone for Options<S> {
    fn clone(&self) -> Self {
        Self {
            default_timeout: self.default_timeout,
            matcher: self.matcher.clone(),
            teardown: self.teardown,
        }
    }
}

impl<S> fmt::Debug for Options<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("default_timeout", &self.default_timeout)
            .field("matcher", &self.matcher)
            .field("teardown", &self.teardown)
            .finish()
    }
}
