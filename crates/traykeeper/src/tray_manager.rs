//! System tray icon owner on the main thread.
//!
//! Builds and destroys the tray icon on request, applies icon, title,
//! tooltip and menu changes, and reports lifecycle transitions back to the
//! thread blocked in `ProxyTrayHost::run`.

use crate::{AppError, AppResult, HostLifecycle, TrayCommand};

use std::{panic::Location, sync::mpsc::Sender};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: Option<TrayIcon>,
    menu: Option<Menu>,
    lifecycle_tx: Sender<HostLifecycle>,
}

impl TrayManager {
    /// Create a manager with no tray icon yet.
    pub fn new(lifecycle_tx: Sender<HostLifecycle>) -> Self {
        Self {
            tray_icon: None,
            menu: None,
            lifecycle_tx,
        }
    }

    /// Apply a tray command. Window and event commands are not handled here.
    pub fn apply(&mut self, command: TrayCommand) {
        let result = match command {
            TrayCommand::Build => {
                self.build();
                Ok(())
            }
            TrayCommand::Destroy => {
                self.destroy();
                Ok(())
            }
            TrayCommand::SetIcon(bytes) => self.set_icon(&bytes),
            TrayCommand::SetTitle(title) => self.set_title(&title),
            TrayCommand::SetTooltip(tooltip) => self.set_tooltip(&tooltip),
            TrayCommand::AddMenuItem { id, label } => self.add_menu_item(id, &label),
            TrayCommand::AddSeparator => self.add_separator(),
            other => {
                debug!(command = ?other, "Command not handled by tray manager");
                Ok(())
            }
        };

        if let Err(e) = result {
            error!(error = ?e, "Tray command failed");
        }
    }

    /// Whether a tray icon currently exists.
    pub fn is_built(&self) -> bool {
        self.tray_icon.is_some()
    }

    #[instrument(skip(self))]
    fn build(&mut self) {
        if self.tray_icon.is_some() {
            warn!("Tray icon already built, reporting ready again");
            self.notify(HostLifecycle::Ready);
            return;
        }

        let menu = Menu::new();

        let result = TrayIconBuilder::new()
            .with_menu(Box::new(menu.clone()))
            .with_menu_on_left_click(false)
            .build();

        match result {
            Ok(tray_icon) => {
                self.tray_icon = Some(tray_icon);
                self.menu = Some(menu);
                info!("System tray icon initialized");
                self.notify(HostLifecycle::Ready);
            }
            Err(e) => {
                error!(error = %e, "Failed to create tray icon");
                self.notify(HostLifecycle::Failed(e.to_string()));
            }
        }
    }

    #[instrument(skip(self))]
    fn destroy(&mut self) {
        self.menu = None;
        match self.tray_icon.take() {
            Some(tray_icon) => {
                drop(tray_icon);
                info!("System tray icon removed");
                self.notify(HostLifecycle::Exited);
            }
            None => debug!("No tray icon to remove"),
        }
    }

    #[track_caller]
    fn set_icon(&mut self, bytes: &[u8]) -> AppResult<()> {
        let icon = Self::load_icon(bytes)?;
        let tray_icon = self.tray_icon()?;

        tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayWidgetError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn set_title(&mut self, title: &str) -> AppResult<()> {
        // Only macOS and Linux render a title; elsewhere this is a no-op.
        self.tray_icon()?.set_title(Some(title));
        Ok(())
    }

    #[track_caller]
    fn set_tooltip(&mut self, tooltip: &str) -> AppResult<()> {
        self.tray_icon()?
            .set_tooltip(Some(tooltip))
            .map_err(|e| AppError::TrayWidgetError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn add_menu_item(&mut self, id: MenuId, label: &str) -> AppResult<()> {
        let item = MenuItem::with_id(id, label, true, None);

        self.menu()?.append(&item).map_err(|e| AppError::TrayWidgetError {
            reason: format!("Failed to add menu entry '{}': {}", label, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn add_separator(&mut self) -> AppResult<()> {
        self.menu()?
            .append(&PredefinedMenuItem::separator())
            .map_err(|e| AppError::TrayWidgetError {
                reason: format!("Failed to add menu separator: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn tray_icon(&self) -> AppResult<&TrayIcon> {
        self.tray_icon.as_ref().ok_or_else(|| AppError::TrayWidgetError {
            reason: "Tray icon not built".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn menu(&self) -> AppResult<&Menu> {
        self.menu.as_ref().ok_or_else(|| AppError::TrayWidgetError {
            reason: "Tray menu not built".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn notify(&self, event: HostLifecycle) {
        if self.lifecycle_tx.send(event).is_err() {
            debug!("Tray host stopped listening for lifecycle events");
        }
    }

    /// Decode PNG (or any format `image` understands) bytes into a tray icon.
    #[track_caller]
    pub(crate) fn load_icon(bytes: &[u8]) -> AppResult<Icon> {
        let img = image::load_from_memory(bytes).map_err(|e| AppError::IconError {
            reason: format!("Failed to decode icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::IconError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
