use crate::{TrayCommand, WindowCommand};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{event_loop::EventLoopProxy, window::Window};
use tracing::trace;
use traykeeper_core::{CoreResult, TrayError, WindowManager};

/// `WindowManager` that forwards to the tao window on the main thread.
pub struct ProxyWindow {
    proxy: EventLoopProxy<TrayCommand>,
}

impl ProxyWindow {
    /// Create a window manager sending to `proxy`.
    pub fn new(proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self { proxy }
    }

    /// Apply a window command. Must run on the main thread.
    pub fn apply(window: &Window, command: WindowCommand) {
        trace!(?command, "Applying window command");
        match command {
            WindowCommand::Show => {
                window.set_visible(true);
                window.set_focus();
            }
            WindowCommand::Unminimize => window.set_minimized(false),
            WindowCommand::SetAlwaysOnTop(on_top) => window.set_always_on_top(on_top),
            WindowCommand::Hide => window.set_visible(false),
        }
    }

    #[track_caller]
    fn send(&self, operation: &'static str, command: WindowCommand) -> CoreResult<()> {
        self.proxy
            .send_event(TrayCommand::Window(command))
            .map_err(|_| TrayError::WindowOperationFailed {
                operation,
                reason: "Event loop closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl WindowManager for ProxyWindow {
    fn show(&self) -> CoreResult<()> {
        self.send("show", WindowCommand::Show)
    }

    fn unminimize(&self) -> CoreResult<()> {
        self.send("unminimize", WindowCommand::Unminimize)
    }

    fn set_always_on_top(&self, on_top: bool) -> CoreResult<()> {
        self.send("set_always_on_top", WindowCommand::SetAlwaysOnTop(on_top))
    }

    fn hide(&self) -> CoreResult<()> {
        self.send("hide", WindowCommand::Hide)
    }
}
