use crate::config::{default_title, default_window_height, default_window_width};

use serde::{Deserialize, Serialize};

/// Main window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial logical width.
    #[serde(default = "default_window_width")]
    pub width: f64,
    /// Initial logical height.
    #[serde(default = "default_window_height")]
    pub height: f64,
    /// Start with only the tray icon visible.
    #[serde(default)]
    pub start_hidden: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_width(),
            height: default_window_height(),
            start_hidden: false,
        }
    }
}
