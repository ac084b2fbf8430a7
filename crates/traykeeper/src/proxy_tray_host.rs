//! `TrayHost` implementation that drives the main-thread `TrayManager`
//! through the tao event loop proxy.
//!
//! Every call turns into a `TrayCommand` on the event loop; `run` blocks on
//! the lifecycle channel the manager reports into.

use crate::{HostLifecycle, TrayClick, TrayCommand, TrayHandlers};

use std::{
    panic::Location,
    sync::{Arc, Mutex, PoisonError, mpsc::Receiver},
};

use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tracing::{debug, info, instrument, warn};
use tray_icon::menu::MenuId;
use traykeeper_core::{
    ClickHandler, CoreResult, ExitCallback, MenuItemId, ReadyCallback, TrayError, TrayHost,
};
use uuid::Uuid;

/// Tray host backed by the tao event loop on the main thread.
pub struct ProxyTrayHost {
    proxy: EventLoopProxy<TrayCommand>,
    handlers: Arc<TrayHandlers>,
    lifecycle_rx: Mutex<Receiver<HostLifecycle>>,
}

impl ProxyTrayHost {
    /// Create a host sending to `proxy` and listening on `lifecycle_rx`.
    pub fn new(
        proxy: EventLoopProxy<TrayCommand>,
        handlers: Arc<TrayHandlers>,
        lifecycle_rx: Receiver<HostLifecycle>,
    ) -> Self {
        Self {
            proxy,
            handlers,
            lifecycle_rx: Mutex::new(lifecycle_rx),
        }
    }

    #[track_caller]
    fn send(&self, command: TrayCommand) -> CoreResult<()> {
        self.proxy
            .send_event(command)
            .map_err(|_| TrayError::HostUnavailable {
                reason: "Event loop closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl TrayHost for ProxyTrayHost {
    #[instrument(skip_all)]
    fn run(&self, on_ready: ReadyCallback, on_exit: ExitCallback) -> CoreResult<()> {
        let lifecycle_rx = self
            .lifecycle_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Leftovers from a previous session must not be mistaken for this one.
        while let Ok(stale) = lifecycle_rx.try_recv() {
            debug!(event = ?stale, "Discarding stale lifecycle event");
        }
        self.handlers.clear();

        self.send(TrayCommand::Build)?;

        match lifecycle_rx.recv() {
            Ok(HostLifecycle::Ready) => {}
            Ok(HostLifecycle::Failed(reason)) => {
                return Err(TrayError::HostStartFailed {
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Ok(HostLifecycle::Exited) | Err(_) => {
                return Err(TrayError::HostStartFailed {
                    reason: "Tray went away before it was ready".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        info!("Tray host ready");
        on_ready();

        loop {
            match lifecycle_rx.recv() {
                Ok(HostLifecycle::Exited) => break,
                Ok(other) => debug!(event = ?other, "Ignoring lifecycle event while running"),
                Err(_) => {
                    warn!("Event loop dropped the lifecycle channel");
                    break;
                }
            }
        }

        info!("Tray host exited");
        on_exit();
        Ok(())
    }

    fn quit(&self) {
        if self.send(TrayCommand::Destroy).is_err() {
            debug!("Event loop already closed, nothing to tear down");
        }
    }

    fn set_icon(&self, icon: &[u8]) -> CoreResult<()> {
        self.send(TrayCommand::SetIcon(icon.to_vec()))
    }

    fn set_title(&self, title: &str) -> CoreResult<()> {
        self.send(TrayCommand::SetTitle(title.to_string()))
    }

    fn set_tooltip(&self, tooltip: &str) -> CoreResult<()> {
        self.send(TrayCommand::SetTooltip(tooltip.to_string()))
    }

    fn add_menu_item(&self, label: &str, tooltip: &str) -> CoreResult<MenuItemId> {
        let id = Uuid::new_v4().to_string();
        // tray-icon menu entries carry no tooltip of their own.
        debug!(%id, label, tooltip, "Adding menu entry");

        self.send(TrayCommand::AddMenuItem {
            id: MenuId::new(&id),
            label: label.to_string(),
        })?;

        Ok(MenuItemId::new(id))
    }

    fn add_separator(&self) -> CoreResult<()> {
        self.send(TrayCommand::AddSeparator)
    }

    fn on_menu_click(&self, item: &MenuItemId, handler: ClickHandler) -> CoreResult<()> {
        self.handlers.set_menu(MenuId::new(item.as_str()), handler);
        Ok(())
    }

    fn set_on_click(&self, handler: ClickHandler) {
        self.handlers.set_click(TrayClick::Left, handler);
    }

    fn set_on_double_click(&self, handler: ClickHandler) {
        self.handlers.set_click(TrayClick::Double, handler);
    }

    fn set_on_right_click(&self, handler: ClickHandler) {
        self.handlers.set_click(TrayClick::Right, handler);
    }

    fn show_menu(&self) -> CoreResult<()> {
        // The context menu is attached to the icon and opens natively on
        // right click.
        debug!("Context menu shown by the platform");
        Ok(())
    }

    fn poll_events(&self) -> CoreResult<()> {
        self.send(TrayCommand::Pump)
    }
}
