/// Commands delivered to the runtime-side `App`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// The user asked to exit; stop the tray and end the process.
    Shutdown,
}
