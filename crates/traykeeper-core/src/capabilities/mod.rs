//! Capability interfaces the controller calls into.
//!
//! Native widgets, windows and dialogs live outside this crate. Each host
//! platform provides one implementation of these traits.

mod dialog_presenter;
mod tray_host;
mod window_manager;

pub use {
    dialog_presenter::{ConsoleDialogPresenter, DialogPresenter, DialogSeverity},
    tray_host::{ClickHandler, ExitCallback, MenuItemId, ReadyCallback, TrayHost},
    window_manager::WindowManager,
};
