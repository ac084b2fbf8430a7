use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Tray lifecycle errors with source location tracking.
#[derive(Error, Debug)]
pub enum TrayError {
    /// The tray host could not be reached (e.g. its event loop is gone).
    #[error("Tray host unavailable: {reason} {location}")]
    HostUnavailable {
        /// Description of why the host is unreachable.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The tray host's event loop failed to start.
    #[error("Tray host failed to start: {reason} {location}")]
    HostStartFailed {
        /// Description of the start-up failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A tray widget operation (icon, tooltip, menu) failed.
    #[error("Tray operation '{operation}' failed: {reason} {location}")]
    TrayOperationFailed {
        /// Name of the failed operation.
        operation: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A window manager operation failed.
    #[error("Window operation '{operation}' failed: {reason} {location}")]
    WindowOperationFailed {
        /// Name of the failed operation.
        operation: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The action queue is at capacity.
    #[error("Action queue is full {location}")]
    ActionQueueFull {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The action queue no longer accepts actions.
    #[error("Action queue is closed {location}")]
    ActionQueueClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The tray did not become ready in time.
    #[error("Tray not ready after {waited:?} {location}")]
    ReadyTimeout {
        /// How long the caller waited.
        waited: Duration,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The controller stopped before the tray became ready.
    #[error("Tray start-up aborted before ready {location}")]
    StartAborted {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`TrayError`].
pub type Result<T> = std::result::Result<T, TrayError>;
