/// Tray lifecycle notifications sent from the main thread back to the
/// blocked `ProxyTrayHost::run` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostLifecycle {
    /// The tray icon was built and can be configured.
    Ready,
    /// Building the tray icon failed.
    Failed(String),
    /// The tray icon was torn down.
    Exited,
}
