//! Configuration management for traykeeper.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, per-field defaults, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{APP_NAME, LivenessConfig, TrayConfig, WindowConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf, sync::Arc, time::Duration};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use traykeeper_core::ControllerSettings;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tray icon text and menu labels.
    #[serde(default)]
    pub tray: TrayConfig,
    /// Message pump and keep-alive timing.
    #[serde(default)]
    pub liveness: LivenessConfig,
    /// Main window settings.
    #[serde(default)]
    pub window: WindowConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::parse(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Controller tunables with the embedded icon attached.
    pub fn controller_settings(&self, icon: Arc<[u8]>) -> ControllerSettings {
        ControllerSettings {
            app_name: APP_NAME.to_string(),
            title: self.tray.title.clone(),
            tooltip: self.tray.tooltip.clone(),
            keep_alive_tooltip: self.tray.keep_alive_tooltip.clone(),
            open_label: self.tray.open_label.clone(),
            exit_label: self.tray.exit_label.clone(),
            icon,
            pump_interval: Duration::from_millis(self.liveness.pump_interval_ms),
            keep_alive_interval: Duration::from_millis(self.liveness.keep_alive_interval_ms),
            icon_refresh_every: self.liveness.icon_refresh_every,
            action_queue_capacity: self.liveness.action_queue_capacity,
            focus_delay: Duration::from_millis(self.liveness.focus_delay_ms),
        }
    }

    /// How long start-up may take before the tray counts as failed.
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.liveness.ready_timeout_ms)
    }

    /// Platform project directories for traykeeper.
    #[track_caller]
    pub(crate) fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "traykeeper", APP_NAME).ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}
