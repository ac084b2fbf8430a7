use crate::config::{
    default_exit_label, default_keep_alive_tooltip, default_open_label, default_title,
    default_tooltip,
};

use serde::{Deserialize, Serialize};

/// Tray icon text and menu labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Title shown next to the icon where supported.
    #[serde(default = "default_title")]
    pub title: String,
    /// Tooltip applied when the tray comes up.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
    /// Tooltip re-applied by the keep-alive loop.
    #[serde(default = "default_keep_alive_tooltip")]
    pub keep_alive_tooltip: String,
    /// Label of the menu entry that opens the window.
    #[serde(default = "default_open_label")]
    pub open_label: String,
    /// Label of the menu entry that exits.
    #[serde(default = "default_exit_label")]
    pub exit_label: String,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tooltip: default_tooltip(),
            keep_alive_tooltip: default_keep_alive_tooltip(),
            open_label: default_open_label(),
            exit_label: default_exit_label(),
        }
    }
}
