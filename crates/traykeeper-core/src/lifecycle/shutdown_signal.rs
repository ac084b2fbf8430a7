//! One-shot shutdown broadcast, renewable between sessions.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

/// Holds the current session's cancellation token behind a lock.
///
/// Closing checks `is_cancelled` under the lock first, so a token is
/// cancelled at most once no matter how many callers race.
pub(crate) struct ShutdownSignal {
    token: Mutex<CancellationToken>,
}

/// Exclusive access to the signal for the duration of a state transition.
pub(crate) struct SignalGuard<'a> {
    token: MutexGuard<'a, CancellationToken>,
}

impl ShutdownSignal {
    pub(crate) fn new() -> Self {
        Self {
            token: Mutex::new(CancellationToken::new()),
        }
    }

    pub(crate) fn lock(&self) -> SignalGuard<'_> {
        SignalGuard {
            token: self.token.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Clone of the current token for a background task to observe.
    pub(crate) fn token(&self) -> CancellationToken {
        self.lock().token()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }
}

impl SignalGuard<'_> {
    /// Cancel the current token. Returns `false` if it was already cancelled.
    pub(crate) fn close(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Close the current token and install a fresh one.
    pub(crate) fn renew(&mut self) {
        self.close();
        *self.token = CancellationToken::new();
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}
