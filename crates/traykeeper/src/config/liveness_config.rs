use crate::config::{
    default_action_queue_capacity, default_focus_delay_ms, default_icon_refresh_every,
    default_keep_alive_interval_ms, default_pump_interval_ms, default_ready_timeout_ms,
};

use serde::{Deserialize, Serialize};

/// Timing of the message pump and keep-alive loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Message pump period in milliseconds.
    #[serde(default = "default_pump_interval_ms")]
    pub pump_interval_ms: u64,
    /// Keep-alive period in milliseconds.
    #[serde(default = "default_keep_alive_interval_ms")]
    pub keep_alive_interval_ms: u64,
    /// Re-apply the icon every N keep-alive ticks (0 disables).
    #[serde(default = "default_icon_refresh_every")]
    pub icon_refresh_every: u32,
    /// Deferred action queue capacity.
    #[serde(default = "default_action_queue_capacity")]
    pub action_queue_capacity: usize,
    /// How long the window stays pinned on top when raised, in milliseconds.
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,
    /// How long to wait for the tray before reporting failure, in milliseconds.
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            pump_interval_ms: default_pump_interval_ms(),
            keep_alive_interval_ms: default_keep_alive_interval_ms(),
            icon_refresh_every: default_icon_refresh_every(),
            action_queue_capacity: default_action_queue_capacity(),
            focus_delay_ms: default_focus_delay_ms(),
            ready_timeout_ms: default_ready_timeout_ms(),
        }
    }
}
