use crate::{AppCommand, AppResult, TrayCommand};

use std::{sync::Arc, time::Duration};

use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};
use traykeeper_core::{DialogPresenter, LifecycleStatus, TrayController};

const STOP_GRACE: Duration = Duration::from_secs(1);

/// Runtime-side application state.
///
/// Starts the tray controller, reports start-up failures to the user and
/// ends the event loop once the user exits from the tray menu.
pub struct App {
    pub(crate) controller: Arc<TrayController>,
    pub(crate) dialogs: Arc<dyn DialogPresenter>,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) ready_timeout: Duration,
    pub(crate) app_name: String,
}

impl App {
    /// Run until shutdown is requested or the tray fails to come up.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(app_name = %self.app_name, "Starting");

        let started = match self.controller.setup() {
            Ok(()) => self.controller.wait_until_ready(self.ready_timeout).await,
            Err(e) => Err(e),
        };

        if let Err(e) = started {
            error!(error = ?e, "Tray failed to start");
            self.controller.quit();
            self.report_error(format!("Failed to start the system tray.\n\n{}", e))
                .await;
            self.exit(1);
            return Err(e.into());
        }

        info!("Tray running");

        loop {
            match self.command_rx.recv().await {
                Some(AppCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                None => {
                    info!("All command senders dropped, shutting down");
                    break;
                }
            }
        }

        self.wait_for_stop().await;
        self.exit(0);

        info!("Shut down successfully");
        Ok(())
    }

    async fn wait_for_stop(&self) {
        let mut status = self.controller.subscribe_status();
        let stopped = status.wait_for(|s| *s == LifecycleStatus::Stopped);

        match tokio::time::timeout(STOP_GRACE, stopped).await {
            Ok(Ok(_)) => info!("Tray stopped cleanly"),
            Ok(Err(_)) => warn!("Status channel closed before tray stopped"),
            Err(_) => warn!(
                "Tray did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }
    }

    async fn report_error(&self, message: String) {
        let dialogs = Arc::clone(&self.dialogs);
        let title = self.app_name.clone();

        if let Err(e) =
            tokio::task::spawn_blocking(move || dialogs.show_error(&title, &message)).await
        {
            error!(error = ?e, "Error dialog task panicked");
        }
    }

    fn exit(&self, code: i32) {
        if self.tray_proxy.send_event(TrayCommand::Exit(code)).is_err() {
            warn!("Event loop already closed");
        }
    }
}
