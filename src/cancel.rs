use std::{cell::Cell, rc::Rc};

/// Cancellation handle for a single pending wait. A cancelled wait never runs its callback and is
/// dropped by the notifier on its next pass.
#[derive(Debug)]
pub(crate) struct Cancel {
    token: Rc<Cell<bool>>,
}

impl From<Rc<Cell<bool>>> for Cancel {
    fn from(token: Rc<Cell<bool>>) -> Self {
        Self { token }
    }
}

impl Cancel {
    pub(crate) fn cancel(&self) {
        self.token.set(true);
    }
}

/// Cancels the wrapped wait when dropped, whether or not it already fired
#[derive(Debug)]
pub(crate) struct CancelOnDrop(Cancel);

impl From<Cancel> for CancelOnDrop {
    fn from(cancel: Cancel) -> Self {
        Self(cancel)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
