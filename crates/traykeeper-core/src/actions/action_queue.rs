//! Bounded mailbox of deferred work.
//!
//! Producers enqueue zero-argument closures from any thread. The pump loop
//! drains at most one per tick and runs it inline.

use crate::{CoreResult, TrayError};

use std::{
    panic::{AssertUnwindSafe, Location},
    sync::{Mutex, PoisonError},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::sync::mpsc::{
    self,
    error::{SendTimeoutError, TryRecvError, TrySendError},
};
use tracing::{debug, error};

/// A deferred zero-argument callable.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// Bounded FIFO of [`Action`]s.
///
/// Outlives individual tray sessions: actions queued while the tray is
/// stopped run once a later session's pump starts draining again.
pub struct ActionQueue {
    tx: mpsc::Sender<Action>,
    rx: Mutex<mpsc::Receiver<Action>>,
    capacity: usize,
}

impl ActionQueue {
    /// Create a queue holding at most `capacity` actions (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);

        Self {
            tx,
            rx: Mutex::new(rx),
            capacity,
        }
    }

    /// Enqueue without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::ActionQueueFull`] when the queue is at capacity;
    /// the action is dropped.
    #[track_caller]
    pub fn enqueue(&self, action: Action) -> CoreResult<()> {
        self.tx.try_send(action).map_err(|e| match e {
            TrySendError::Full(_) => TrayError::ActionQueueFull {
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Closed(_) => TrayError::ActionQueueClosed {
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }

    /// Enqueue, waiting up to `timeout` for a free slot.
    ///
    /// Errors carry the location of this call, not of the `.await`.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::ActionQueueFull`] if no slot frees up in time.
    #[track_caller]
    pub fn enqueue_timeout(
        &self,
        action: Action,
        timeout: Duration,
    ) -> impl Future<Output = CoreResult<()>> + Send + '_ {
        let location = ErrorLocation::from(Location::caller());

        async move {
            debug!(?timeout, "Waiting for action queue slot");
            self.tx
                .send_timeout(action, timeout)
                .await
                .map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => TrayError::ActionQueueFull { location },
                    SendTimeoutError::Closed(_) => TrayError::ActionQueueClosed { location },
                })
        }
    }

    /// Number of actions waiting to run.
    pub fn len(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    /// Whether no actions are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of queued actions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the oldest queued action, if any.
    pub(crate) fn pop(&self) -> Option<Action> {
        let mut rx = self.rx.lock().unwrap_or_else(PoisonError::into_inner);

        match rx.try_recv() {
            Ok(action) => Some(action),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Pop one action and run it, containing any panic.
    ///
    /// Returns whether an action was run.
    pub(crate) fn run_next(&self) -> bool {
        let Some(action) = self.pop() else {
            return false;
        };

        // The receiver lock is released before the action runs, so an action
        // may enqueue follow-up work.
        if std::panic::catch_unwind(AssertUnwindSafe(action)).is_err() {
            error!("Queued action panicked");
        } else {
            debug!(remaining = self.len(), "Queued action completed");
        }

        true
    }
}
