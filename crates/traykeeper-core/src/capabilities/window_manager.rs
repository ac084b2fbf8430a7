use crate::CoreResult;

/// The application's main window.
///
/// Every operation is idempotent: showing a visible window or hiding a
/// hidden one is not an error.
pub trait WindowManager: Send + Sync {
    /// Make the window visible.
    fn show(&self) -> CoreResult<()>;

    /// Restore the window if it is minimized.
    fn unminimize(&self) -> CoreResult<()>;

    /// Pin or unpin the window above all others.
    fn set_always_on_top(&self, on_top: bool) -> CoreResult<()>;

    /// Hide the window.
    fn hide(&self) -> CoreResult<()>;
}
