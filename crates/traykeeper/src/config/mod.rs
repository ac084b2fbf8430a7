mod liveness_config;
mod tray_config;
mod window_config;
#[allow(clippy::module_inception)]
mod config;

pub(crate) use {
    config::Config, liveness_config::LivenessConfig, tray_config::TrayConfig,
    window_config::WindowConfig,
};

pub(crate) const APP_NAME: &str = "TrayKeeper";

pub(crate) const DEFAULT_PUMP_INTERVAL_MS: u64 = 100;
pub(crate) const DEFAULT_KEEP_ALIVE_INTERVAL_MS: u64 = 2_000;
pub(crate) const DEFAULT_ICON_REFRESH_EVERY: u32 = 10;
pub(crate) const DEFAULT_ACTION_QUEUE_CAPACITY: usize = 10;
pub(crate) const DEFAULT_FOCUS_DELAY_MS: u64 = 100;
pub(crate) const DEFAULT_READY_TIMEOUT_MS: u64 = 5_000;

pub(crate) const DEFAULT_WINDOW_WIDTH: f64 = 960.0;
pub(crate) const DEFAULT_WINDOW_HEIGHT: f64 = 640.0;

pub(crate) fn default_title() -> String {
    APP_NAME.to_string()
}

pub(crate) fn default_tooltip() -> String {
    format!("{} - Click to open", APP_NAME)
}

pub(crate) fn default_keep_alive_tooltip() -> String {
    format!("{} - Running in background", APP_NAME)
}

pub(crate) fn default_open_label() -> String {
    "Open".to_string()
}

pub(crate) fn default_exit_label() -> String {
    "Exit".to_string()
}

pub(crate) fn default_pump_interval_ms() -> u64 {
    DEFAULT_PUMP_INTERVAL_MS
}

pub(crate) fn default_keep_alive_interval_ms() -> u64 {
    DEFAULT_KEEP_ALIVE_INTERVAL_MS
}

pub(crate) fn default_icon_refresh_every() -> u32 {
    DEFAULT_ICON_REFRESH_EVERY
}

pub(crate) fn default_action_queue_capacity() -> usize {
    DEFAULT_ACTION_QUEUE_CAPACITY
}

pub(crate) fn default_focus_delay_ms() -> u64 {
    DEFAULT_FOCUS_DELAY_MS
}

pub(crate) fn default_ready_timeout_ms() -> u64 {
    DEFAULT_READY_TIMEOUT_MS
}

pub(crate) fn default_window_width() -> f64 {
    DEFAULT_WINDOW_WIDTH
}

pub(crate) fn default_window_height() -> f64 {
    DEFAULT_WINDOW_HEIGHT
}
