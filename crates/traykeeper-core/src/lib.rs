//! TrayKeeper Core Library
//!
//! Platform-independent lifecycle controller for a long-lived tray icon:
//! idempotent start/stop from any thread, a message pump and keep-alive loop
//! that stop the host shell from treating the icon as dormant, and a bounded
//! queue of deferred actions.
//!
//! The native tray widget, the main window and modal dialogs are supplied by
//! the application through [`TrayHost`], [`WindowManager`] and
//! [`DialogPresenter`].
//!
//! # Example
//!
//! ```no_run
//! use traykeeper_core::{ControllerSettings, CoreResult, TrayController, TrayHost, WindowManager};
//!
//! use std::{sync::Arc, time::Duration};
//!
//! async fn start(host: Arc<dyn TrayHost>, window: Arc<dyn WindowManager>) -> CoreResult<()> {
//!     let runtime = tokio::runtime::Handle::current();
//!     let controller = Arc::new(TrayController::new(
//!         host,
//!         window,
//!         ControllerSettings::default(),
//!         runtime,
//!     ));
//!
//!     controller.set_quit_callback(|| println!("Goodbye"));
//!     controller.setup()?;
//!     controller.wait_until_ready(Duration::from_secs(5)).await?;
//!     Ok(())
//! }
//! ```

mod actions;
mod capabilities;
mod error;
mod lifecycle;
mod liveness;

pub use {
    actions::{Action, ActionQueue},
    capabilities::{
        ClickHandler, ConsoleDialogPresenter, DialogPresenter, DialogSeverity, ExitCallback,
        MenuItemId, ReadyCallback, TrayHost, WindowManager,
    },
    error::{Result as CoreResult, TrayError},
    lifecycle::{ControllerSettings, LifecycleStatus, QuitCallback, TrayController},
};
