//! Shared run/ready flags and the transitions between them.

use crate::{LifecycleStatus, lifecycle::ShutdownSignal};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// A started tray session.
///
/// Callbacks carry the session id so that a late exit callback from an
/// earlier session cannot reset the flags of a newer one.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) id: u64,
    pub(crate) shutdown: CancellationToken,
}

/// Flags shared by the controller, the host callbacks and the liveness loops.
///
/// Every transition takes the shutdown-signal lock around its compare-and-swap
/// so that renewing the signal on start and closing it on stop are ordered
/// with the flag change.
pub(crate) struct ControllerState {
    running: AtomicBool,
    ready: AtomicBool,
    session: AtomicU64,
    shutdown: ShutdownSignal,
    status_tx: watch::Sender<LifecycleStatus>,
}

impl ControllerState {
    pub(crate) fn new() -> Self {
        let (status_tx, _) = watch::channel(LifecycleStatus::Stopped);

        Self {
            running: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            session: AtomicU64::new(0),
            shutdown: ShutdownSignal::new(),
            status_tx,
        }
    }

    /// `running` false -> true. Only one concurrent caller gets a session.
    pub(crate) fn try_start(&self) -> Option<Session> {
        let mut signal = self.shutdown.lock();

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        signal.renew();
        self.ready.store(false, Ordering::Release);
        let id = self.session.fetch_add(1, Ordering::AcqRel) + 1;
        self.status_tx.send_replace(LifecycleStatus::Starting);

        Some(Session {
            id,
            shutdown: signal.token(),
        })
    }

    /// `running` true -> false. Only one concurrent caller wins and closes
    /// the shutdown signal.
    pub(crate) fn try_stop(&self) -> bool {
        let mut signal = self.shutdown.lock();

        if self
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        signal.close();
        self.status_tx.send_replace(LifecycleStatus::Stopping);
        true
    }

    /// Record the host's ready callback. Returns `false` if the session was
    /// stopped or superseded before it became ready.
    pub(crate) fn mark_ready(&self, session_id: u64) -> bool {
        let _signal = self.shutdown.lock();

        if !self.is_current(session_id) || !self.running.load(Ordering::Acquire) {
            return false;
        }

        self.ready.store(true, Ordering::Release);
        self.status_tx.send_if_modified(|status| {
            if *status == LifecycleStatus::Starting {
                *status = LifecycleStatus::Running;
                true
            } else {
                false
            }
        });
        true
    }

    /// Record that the host's tray is gone, whoever initiated it.
    ///
    /// Returns `false` for a stale session, leaving the flags untouched.
    pub(crate) fn mark_exited(&self, session_id: u64) -> bool {
        let mut signal = self.shutdown.lock();

        if !self.is_current(session_id) {
            return false;
        }

        self.running.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
        signal.close();
        self.status_tx.send_replace(LifecycleStatus::Stopped);
        true
    }

    /// Whether `session_id` is the current session and has not been stopped.
    pub(crate) fn is_live(&self, session_id: u64) -> bool {
        self.is_current(session_id) && self.running.load(Ordering::Acquire)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub(crate) fn is_shutdown_closed(&self) -> bool {
        self.shutdown.is_closed()
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.token()
    }

    pub(crate) fn status(&self) -> LifecycleStatus {
        *self.status_tx.borrow()
    }

    pub(crate) fn subscribe_status(&self) -> watch::Receiver<LifecycleStatus> {
        self.status_tx.subscribe()
    }

    fn is_current(&self, session_id: u64) -> bool {
        self.session.load(Ordering::Acquire) == session_id
    }
}
