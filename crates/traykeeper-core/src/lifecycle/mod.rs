mod controller;
mod lifecycle_status;
mod settings;
mod shutdown_signal;
mod state;
mod supervisor;

pub use {
    controller::{QuitCallback, TrayController},
    lifecycle_status::LifecycleStatus,
    settings::ControllerSettings,
};

pub(crate) use {
    shutdown_signal::ShutdownSignal,
    state::{ControllerState, Session},
    supervisor::{spawn_blocking_supervised, spawn_detached},
};
