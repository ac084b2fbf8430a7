use std::{sync::Arc, time::Duration};

/// Tunables for a [`TrayController`](crate::TrayController).
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Application name used in menu tooltips.
    pub app_name: String,
    /// Title shown next to the tray icon where supported.
    pub title: String,
    /// Tooltip applied when the tray becomes ready.
    pub tooltip: String,
    /// Tooltip re-applied on every keep-alive tick.
    pub keep_alive_tooltip: String,
    /// Label of the menu entry that shows the main window.
    pub open_label: String,
    /// Label of the menu entry that quits the application.
    pub exit_label: String,
    /// Encoded icon image. Empty means no icon is set or refreshed.
    pub icon: Arc<[u8]>,
    /// Period of the message pump loop.
    pub pump_interval: Duration,
    /// Period of the keep-alive loop.
    pub keep_alive_interval: Duration,
    /// Re-apply the icon every this many keep-alive ticks. 0 disables it.
    pub icon_refresh_every: u32,
    /// Capacity of the deferred action queue.
    pub action_queue_capacity: usize,
    /// How long the window stays pinned on top when brought forward.
    pub focus_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            app_name: "TrayKeeper".to_string(),
            title: "TrayKeeper".to_string(),
            tooltip: "TrayKeeper - Click to open".to_string(),
            keep_alive_tooltip: "TrayKeeper - Running in background".to_string(),
            open_label: "Open".to_string(),
            exit_label: "Exit".to_string(),
            icon: Arc::from(Vec::new()),
            pump_interval: Duration::from_millis(100),
            keep_alive_interval: Duration::from_secs(2),
            icon_refresh_every: 10,
            action_queue_capacity: 10,
            focus_delay: Duration::from_millis(100),
        }
    }
}
