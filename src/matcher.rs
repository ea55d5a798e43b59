use std::{fmt, rc::Rc};

/// Compares a target state (first argument) against an observed state (second argument).
pub struct Matcher<S> {
    predicate: Rc<dyn Fn(&S, &S) -> bool>,
}

impl<S> Matcher<S> {
    /// Build a `Matcher` from an arbitrary predicate
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &S) -> bool + 'static,
    {
        Self {
            predicate: Rc::new(predicate),
        }
    }

    /// Match on a single projected field of the state, e.g. the `status` of a record
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: PartialEq,
        F: Fn(&S) -> K + 'static,
    {
        Self::new(move |target, observed| key(target) == key(observed))
    }

    pub fn matches(&self, target: &S, observed: &S) -> bool {
        (self.predicate)(target, observed)
    }
}

impl<S: PartialEq + 'static> Matcher<S> {
    /// Exact equality, the default policy
    pub fn equality() -> Self {
        Self::new(|target: &S, observed: &S| observed == target)
    }
}

impl<S: PartialEq + 'static> Default for Matcher<S> {
    fn default() -> Self {
        Self::equality()
    }
}

impl<S> Clone for Matcher<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

impl<S> fmt::Debug for Matcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").finish_non_exhaustive()
    }
}
