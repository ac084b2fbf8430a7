use crate::WindowCommand;

use tray_icon::{
    TrayIconEvent,
    menu::{MenuEvent, MenuId},
};

/// Commands delivered to the main UI thread through the event loop proxy.
///
/// The main thread owns `TrayManager` and the window (`TrayIcon` is `!Send`),
/// so every tray mutation, window change and widget event flows through this
/// enum.
#[derive(Debug)]
pub enum TrayCommand {
    /// Create the tray icon and its empty context menu.
    Build,
    /// Tear the tray icon down.
    Destroy,
    /// Replace the icon with encoded image bytes.
    SetIcon(Vec<u8>),
    /// Set the title shown next to the icon.
    SetTitle(String),
    /// Set the hover tooltip.
    SetTooltip(String),
    /// Append a menu entry with a pre-assigned id.
    AddMenuItem {
        /// Identifier click events will carry.
        id: MenuId,
        /// Visible label.
        label: String,
    },
    /// Append a menu separator.
    AddSeparator,
    /// Wake the event loop so pending platform messages get processed.
    Pump,
    /// Apply a change to the main window.
    Window(WindowCommand),
    /// A context menu entry was activated.
    Menu(MenuEvent),
    /// The tray icon was clicked.
    Icon(TrayIconEvent),
    /// Leave the event loop and end the process with the given code.
    Exit(i32),
}
