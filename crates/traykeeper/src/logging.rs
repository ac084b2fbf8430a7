//! Tracing subscriber setup: stdout plus a daily rolling log file.

use crate::config::Config;

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "traykeeper=debug,traykeeper_core=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. The returned guard flushes the
/// file writer on drop and must live until the process exits; `None` means
/// only stdout logging is active.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_dir = Config::project_dirs()
        .ok()
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .filter(|dir| fs::create_dir_all(dir).is_ok());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, "traykeeper.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();

            tracing::debug!(log_dir = ?dir, "File logging enabled");
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();

            tracing::warn!("No log directory available, logging to stdout only");
            None
        }
    }
}
