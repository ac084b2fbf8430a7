//! Tray lifecycle controller.
//!
//! Owns the run/ready flags and the shutdown signal, starts the host's tray
//! event loop on the blocking pool, wires menu and click handlers once the
//! host reports ready, and tears everything down again on quit.
//!
//! ```text
//! Stopped --setup--> Starting --ready cb--> Running --quit/quit_app--> Stopping --exit cb--> Stopped
//! ```
//!
//! Repeated `setup`/`quit` calls in any non-terminal state are no-ops.

use crate::{
    Action, ActionQueue, ClickHandler, ControllerSettings, CoreResult, LifecycleStatus, TrayError,
    TrayHost, WindowManager,
    lifecycle::{ControllerState, Session, spawn_blocking_supervised, spawn_detached},
    liveness::{LivenessPump, LivenessSettings},
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::{runtime::Handle, sync::watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Finalizer invoked by [`TrayController::quit_app`] instead of exiting.
pub type QuitCallback = Arc<dyn Fn() + Send + Sync>;

type Terminator = Arc<dyn Fn() + Send + Sync>;

fn exit_process() {
    std::process::exit(0)
}

/// Concurrent lifecycle controller for a tray icon.
///
/// Create one per process, wrap it in an `Arc` and share it. `setup` may be
/// called again after a full stop; every session gets a fresh shutdown
/// signal.
pub struct TrayController {
    host: Arc<dyn TrayHost>,
    window: Arc<dyn WindowManager>,
    state: Arc<ControllerState>,
    actions: Arc<ActionQueue>,
    settings: ControllerSettings,
    runtime: Handle,
    quit_callback: Mutex<Option<QuitCallback>>,
    terminator: Terminator,
}

impl TrayController {
    /// Create a stopped controller.
    ///
    /// `runtime` runs the liveness loops and detached window tasks; the
    /// host's blocking event loop goes to its blocking pool.
    pub fn new(
        host: Arc<dyn TrayHost>,
        window: Arc<dyn WindowManager>,
        settings: ControllerSettings,
        runtime: Handle,
    ) -> Self {
        let actions = Arc::new(ActionQueue::new(settings.action_queue_capacity));

        Self {
            host,
            window,
            state: Arc::new(ControllerState::new()),
            actions,
            settings,
            runtime,
            quit_callback: Mutex::new(None),
            terminator: Arc::new(exit_process),
        }
    }

    /// Replace what `quit_app` does when no quit callback is registered.
    ///
    /// Defaults to `std::process::exit(0)`.
    pub fn with_terminator(mut self, terminator: impl Fn() + Send + Sync + 'static) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    /// Register the finalizer `quit_app` runs in place of process exit.
    ///
    /// Set it before `setup`; a concurrent `quit_app` may still see the old
    /// value.
    pub fn set_quit_callback(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self
            .quit_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    /// Start the tray event loop in the background.
    ///
    /// Returns immediately. A second call while running is a no-op. A start-up
    /// failure resets the controller to stopped and is logged; use
    /// [`wait_until_ready`](Self::wait_until_ready) to observe it.
    #[instrument(skip(self))]
    pub fn setup(self: &Arc<Self>) -> CoreResult<()> {
        let Some(session) = self.state.try_start() else {
            debug!("System tray already running");
            return Ok(());
        };

        let session_id = session.id;
        let this = Arc::clone(self);
        let state = Arc::clone(&self.state);

        spawn_blocking_supervised(
            &self.runtime,
            "tray_host",
            move || this.run_host(session),
            move || {
                state.mark_exited(session_id);
            },
        );

        info!(session = session_id, "System tray setup completed");
        Ok(())
    }

    /// Bring the main window to the foreground without blocking the caller.
    ///
    /// Briefly pins the window on top so platforms that ignore focus
    /// requests still raise it. Faults are logged, never propagated.
    #[instrument(skip(self))]
    pub fn show_window(&self) {
        info!("System tray: Showing window");

        let window = Arc::clone(&self.window);
        let focus_delay = self.settings.focus_delay;

        spawn_detached(&self.runtime, "show_window", async move {
            window.show()?;
            window.unminimize()?;
            window.set_always_on_top(true)?;
            tokio::time::sleep(focus_delay).await;
            window.set_always_on_top(false)
        });
    }

    /// Hide the main window without blocking the caller.
    #[instrument(skip(self))]
    pub fn hide_window(&self) {
        info!("System tray: Hiding window");

        let window = Arc::clone(&self.window);
        spawn_detached(&self.runtime, "hide_window", async move { window.hide() });
    }

    /// User-initiated quit.
    ///
    /// Stops the tray, then runs the quit callback, or exits the process when
    /// none is registered. No-op when not running.
    #[instrument(skip(self))]
    pub fn quit_app(&self) {
        info!("System tray: Quitting application");

        if !self.stop() {
            debug!("System tray not running, ignoring quit");
            return;
        }

        let callback = self
            .quit_callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match callback {
            Some(callback) => callback(),
            None => (self.terminator)(),
        }
    }

    /// Programmatic teardown: stops the tray without running the quit
    /// callback or exiting the process. No-op when not running.
    #[instrument(skip(self))]
    pub fn quit(&self) {
        if self.stop() {
            info!("System tray stopped");
        }
    }

    /// Queue work for the pump loop. Fails instead of blocking when full.
    #[track_caller]
    pub fn enqueue_action(&self, action: impl FnOnce() + Send + 'static) -> CoreResult<()> {
        self.actions.enqueue(Box::new(action))
    }

    /// Queue work for the pump loop, waiting up to `timeout` for space.
    #[track_caller]
    pub fn enqueue_action_timeout(
        &self,
        action: impl FnOnce() + Send + 'static,
        timeout: Duration,
    ) -> impl Future<Output = CoreResult<()>> + Send + '_ {
        let action: Action = Box::new(action);
        self.actions.enqueue_timeout(action, timeout)
    }

    /// Wait until the host's ready callback has run.
    ///
    /// # Errors
    ///
    /// [`TrayError::StartAborted`] if the controller is or becomes stopped
    /// first, [`TrayError::ReadyTimeout`] if `timeout` elapses.
    #[instrument(skip(self))]
    pub async fn wait_until_ready(&self, timeout: Duration) -> CoreResult<()> {
        let mut status_rx = self.state.subscribe_status();

        let wait = async {
            loop {
                let status = *status_rx.borrow_and_update();
                match status {
                    LifecycleStatus::Running => return Ok(()),
                    LifecycleStatus::Stopped | LifecycleStatus::Stopping => {
                        return Err(TrayError::StartAborted {
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    LifecycleStatus::Starting => {}
                }

                if status_rx.changed().await.is_err() {
                    return Err(TrayError::StartAborted {
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| TrayError::ReadyTimeout {
                waited: timeout,
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    /// Whether a session is between `setup` and quit.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Whether the host's ready callback ran for the current session.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Current lifecycle phase.
    pub fn status(&self) -> LifecycleStatus {
        self.state.status()
    }

    /// Watch lifecycle phase changes.
    pub fn subscribe_status(&self) -> watch::Receiver<LifecycleStatus> {
        self.state.subscribe_status()
    }

    /// Token cancelled when the current session shuts down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.state.shutdown_token()
    }

    /// Whether the current session's shutdown signal has fired.
    pub fn is_shutdown_signalled(&self) -> bool {
        self.state.is_shutdown_closed()
    }

    /// Number of deferred actions waiting for the pump.
    pub fn pending_actions(&self) -> usize {
        self.actions.len()
    }

    /// Win the `running` true -> false transition and tell the host to stop.
    fn stop(&self) -> bool {
        if !self.state.try_stop() {
            return false;
        }

        self.host.quit();
        true
    }

    /// Body of the blocking host task.
    fn run_host(self: Arc<Self>, session: Session) {
        let session_id = session.id;
        let ready_ctl = Arc::downgrade(&self);
        let exit_ctl = Arc::downgrade(&self);
        let shutdown = session.shutdown;

        let result = self.host.run(
            Box::new(move || {
                if let Some(controller) = ready_ctl.upgrade() {
                    controller.on_ready(session_id, shutdown);
                }
            }),
            Box::new(move || {
                if let Some(controller) = exit_ctl.upgrade() {
                    controller.on_exit(session_id);
                }
            }),
        );

        match result {
            Ok(()) => {
                // Hosts that return without calling on_exit still end the session.
                self.state.mark_exited(session_id);
            }
            Err(e) => {
                error!(session = session_id, error = ?e, "System tray failed to start");
                self.state.mark_exited(session_id);
            }
        }
    }

    #[instrument(skip(self, shutdown))]
    fn on_ready(self: &Arc<Self>, session_id: u64, shutdown: CancellationToken) {
        if !self.state.is_live(session_id) {
            self.abandon_session(session_id);
            return;
        }

        if let Err(e) = self.wire_tray() {
            error!(error = ?e, "Failed to configure system tray");
        }

        if !self.state.mark_ready(session_id) {
            self.abandon_session(session_id);
            return;
        }

        let pump = Arc::new(LivenessPump::new(
            Arc::clone(&self.host),
            Arc::clone(&self.state),
            Arc::clone(&self.actions),
            LivenessSettings {
                pump_interval: self.settings.pump_interval,
                keep_alive_interval: self.settings.keep_alive_interval,
                icon_refresh_every: self.settings.icon_refresh_every,
                tooltip: self.settings.keep_alive_tooltip.clone(),
                icon: Arc::clone(&self.settings.icon),
            },
        ));
        pump.launch(&self.runtime, shutdown);

        info!("System tray ready");
    }

    /// The session was stopped while the host was still building its tray.
    ///
    /// A quit that reached the host before the tray existed may have been
    /// dropped, so ask again; the host's exit callback then ends the session.
    fn abandon_session(&self, session_id: u64) {
        debug!(session = session_id, "Tray became ready after its session stopped");
        self.host.quit();
    }

    fn on_exit(&self, session_id: u64) {
        if self.state.mark_exited(session_id) {
            info!(session = session_id, "System tray exited");
        } else {
            debug!(session = session_id, "Ignoring exit of superseded tray session");
        }
    }

    /// Icon, tooltip, click handlers and the two menu entries.
    ///
    /// Icon, title and tooltip failures are logged; menu failures abort.
    fn wire_tray(self: &Arc<Self>) -> CoreResult<()> {
        let settings = &self.settings;

        if !settings.icon.is_empty() {
            if let Err(e) = self.host.set_icon(&settings.icon) {
                warn!(error = ?e, "Failed to set tray icon");
            }
        }
        if let Err(e) = self.host.set_title(&settings.title) {
            warn!(error = ?e, "Failed to set tray title");
        }
        if let Err(e) = self.host.set_tooltip(&settings.tooltip) {
            warn!(error = ?e, "Failed to set tray tooltip");
        }

        self.host
            .set_on_click(self.handler(|controller| controller.show_window()));
        self.host
            .set_on_double_click(self.handler(|controller| controller.show_window()));
        self.host.set_on_right_click(self.handler(|controller| {
            if let Err(e) = controller.host.show_menu() {
                warn!(error = ?e, "Failed to show tray menu");
            }
        }));

        let open_item = self
            .host
            .add_menu_item(&settings.open_label, "Open main window")?;
        self.host.on_menu_click(
            &open_item,
            self.handler(|controller| controller.show_window()),
        )?;

        self.host.add_separator()?;

        let exit_item = self
            .host
            .add_menu_item(&settings.exit_label, &format!("Exit {}", settings.app_name))?;
        self.host.on_menu_click(
            &exit_item,
            self.handler(|controller| {
                info!("Quit menu clicked");
                controller.quit_app();
            }),
        )?;

        Ok(())
    }

    /// Handler holding only a weak reference, so the host's handler table
    /// does not keep the controller alive.
    fn handler<F>(self: &Arc<Self>, f: F) -> ClickHandler
    where
        F: Fn(&TrayController) + Send + Sync + 'static,
    {
        let controller = Arc::downgrade(self);

        Arc::new(move || {
            if let Some(controller) = controller.upgrade() {
                f(controller.as_ref());
            }
        })
    }
}
