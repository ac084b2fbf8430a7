//! Handler table shared between `ProxyTrayHost` and the main thread.
//!
//! The controller registers handlers through the host from the runtime; the
//! main thread looks them up when a menu or icon event arrives. Handlers are
//! cloned out of the table before they run so a handler may re-register
//! without deadlocking.

use crate::TrayClick;

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace};
use tray_icon::menu::MenuId;
use traykeeper_core::ClickHandler;

#[derive(Default)]
struct HandlerTable {
    menu: HashMap<MenuId, ClickHandler>,
    left: Option<ClickHandler>,
    double: Option<ClickHandler>,
    right: Option<ClickHandler>,
}

/// Click and menu handlers registered for the current tray.
#[derive(Default)]
pub struct TrayHandlers {
    table: Mutex<HandlerTable>,
}

impl TrayHandlers {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a menu entry, replacing any previous one.
    pub fn set_menu(&self, id: MenuId, handler: ClickHandler) {
        self.lock().menu.insert(id, handler);
    }

    /// Register the handler for an icon click.
    pub fn set_click(&self, click: TrayClick, handler: ClickHandler) {
        let mut table = self.lock();
        let slot = match click {
            TrayClick::Left => &mut table.left,
            TrayClick::Double => &mut table.double,
            TrayClick::Right => &mut table.right,
        };
        *slot = Some(handler);
    }

    /// Run the handler for a menu entry. Returns `false` if none is registered.
    pub fn dispatch_menu(&self, id: &MenuId) -> bool {
        let handler = self.lock().menu.get(id).cloned();
        match handler {
            Some(handler) => {
                debug!(menu_id = ?id, "Menu entry activated");
                handler();
                true
            }
            None => {
                trace!(menu_id = ?id, "No handler for menu entry");
                false
            }
        }
    }

    /// Run the handler for an icon click. Returns `false` if none is registered.
    pub fn dispatch_click(&self, click: TrayClick) -> bool {
        let handler = {
            let table = self.lock();
            match click {
                TrayClick::Left => table.left.clone(),
                TrayClick::Double => table.double.clone(),
                TrayClick::Right => table.right.clone(),
            }
        };
        match handler {
            Some(handler) => {
                debug!(?click, "Tray icon clicked");
                handler();
                true
            }
            None => false,
        }
    }

    /// Drop every registered handler.
    ///
    /// Menu ids are per tray instance, so the table is cleared whenever a
    /// tray is torn down.
    pub fn clear(&self) {
        *self.lock() = HandlerTable::default();
    }

    /// Number of registered menu handlers.
    pub fn menu_len(&self) -> usize {
        self.lock().menu.len()
    }

    fn lock(&self) -> MutexGuard<'_, HandlerTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
