/// Main window changes requested from the async runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Make the window visible and focus it.
    Show,
    /// Restore the window from the minimized state.
    Unminimize,
    /// Pin or unpin the window above all others.
    SetAlwaysOnTop(bool),
    /// Hide the window.
    Hide,
}
