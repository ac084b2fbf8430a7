use crate::CoreResult;

use std::{fmt, sync::Arc};

/// Handler invoked when the user clicks the tray icon or a menu entry.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Invoked by the host once its tray is up and can be configured.
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Invoked by the host after its tray has been torn down.
pub type ExitCallback = Box<dyn FnOnce() + Send>;

/// Opaque handle to a menu entry added through [`TrayHost::add_menu_item`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuItemId(String);

impl MenuItemId {
    /// Wrap a host-specific identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The host-specific identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Native tray widget.
///
/// All methods except [`run`](TrayHost::run) must return promptly; they are
/// called from the ready callback and from the liveness loops.
pub trait TrayHost: Send + Sync {
    /// Run the tray event loop. Blocks until the tray exits.
    ///
    /// Implementations call `on_ready` once the tray can be configured and
    /// `on_exit` after the tray has been torn down. Returning `Err` means the
    /// tray never came up and neither callback was invoked.
    fn run(&self, on_ready: ReadyCallback, on_exit: ExitCallback) -> CoreResult<()>;

    /// Ask the tray event loop to tear down its native resources and return.
    fn quit(&self);

    /// Replace the tray icon with encoded image bytes.
    fn set_icon(&self, icon: &[u8]) -> CoreResult<()>;

    /// Set the title shown next to the icon where the platform supports one.
    fn set_title(&self, title: &str) -> CoreResult<()>;

    /// Set the hover tooltip.
    fn set_tooltip(&self, tooltip: &str) -> CoreResult<()>;

    /// Append an entry to the context menu.
    fn add_menu_item(&self, label: &str, tooltip: &str) -> CoreResult<MenuItemId>;

    /// Append a separator to the context menu.
    fn add_separator(&self) -> CoreResult<()>;

    /// Register the handler for a menu entry.
    fn on_menu_click(&self, item: &MenuItemId, handler: ClickHandler) -> CoreResult<()>;

    /// Register the single left-click handler.
    fn set_on_click(&self, handler: ClickHandler);

    /// Register the double-click handler.
    fn set_on_double_click(&self, handler: ClickHandler);

    /// Register the right-click handler.
    fn set_on_right_click(&self, handler: ClickHandler);

    /// Pop up the context menu at the cursor.
    fn show_menu(&self) -> CoreResult<()>;

    /// Non-blocking poll of the platform event queue.
    fn poll_events(&self) -> CoreResult<()>;
}
