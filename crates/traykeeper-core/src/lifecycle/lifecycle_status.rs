use std::fmt;

/// Observable phase of the tray lifecycle.
///
/// `Stopped -> Starting -> Running -> Stopping -> Stopped`. A start-up
/// failure goes straight from `Starting` back to `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleStatus {
    /// No tray event loop is running.
    #[default]
    Stopped,
    /// Setup succeeded; waiting for the host's ready callback.
    Starting,
    /// The tray is configured and the liveness loops are running.
    Running,
    /// Quit was requested; waiting for the host's exit callback.
    Stopping,
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleStatus::Stopped => "stopped",
            LifecycleStatus::Starting => "starting",
            LifecycleStatus::Running => "running",
            LifecycleStatus::Stopping => "stopping",
        };
        f.write_str(name)
    }
}
