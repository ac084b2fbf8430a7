//! TrayKeeper: a long-lived system tray icon that keeps itself alive and
//! opens the main window on demand.

mod app;
mod app_command;
mod config;
mod error;
mod host_lifecycle;
mod logging;
mod native_dialog_presenter;
mod proxy_tray_host;
mod proxy_window;
mod tray_click;
mod tray_command;
mod tray_handlers;
mod tray_manager;
mod window_command;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    host_lifecycle::HostLifecycle,
    native_dialog_presenter::NativeDialogPresenter,
    proxy_tray_host::ProxyTrayHost,
    proxy_window::ProxyWindow,
    tray_click::TrayClick,
    tray_command::TrayCommand,
    tray_handlers::TrayHandlers,
    tray_manager::TrayManager,
    window_command::WindowCommand,
};

use crate::config::{APP_NAME, Config};

use std::sync::{Arc, mpsc::Receiver};

use tao::{
    dpi::LogicalSize,
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
    window::WindowBuilder,
};
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tray_icon::{TrayIconEvent, menu::MenuEvent};
use traykeeper_core::{DialogPresenter, TrayController};

/// Tray icon embedded at compile time so it works regardless of install
/// location.
pub(crate) const TRAY_ICON: &[u8] = include_bytes!("../resources/icons/tray.png");

/// Application entry point.
fn main() {
    let mut log_guard = logging::init();
    let dialogs: Arc<dyn DialogPresenter> = Arc::new(NativeDialogPresenter::new());

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = ?e, "Failed to load config, using defaults");
            dialogs.show_warning(
                APP_NAME,
                &format!(
                    "Could not load the configuration file. Default settings will be used.\n\n{}",
                    e
                ),
            );
            Config::default()
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    let window = match WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        .with_visible(!config.window.start_hidden)
        .build(&event_loop)
    {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create main window: {:?}", e);
            dialogs.show_error(APP_NAME, &format!("Failed to create the main window.\n\n{}", e));
            std::process::exit(1);
        }
    };

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let (lifecycle_tx, lifecycle_rx) = std::sync::mpsc::channel();
    let mut tray_manager = TrayManager::new(lifecycle_tx);
    let handlers = Arc::new(TrayHandlers::new());

    // Widget callbacks fire on whichever thread the platform chooses; route
    // them through the event loop so handlers run on the main thread.
    let menu_proxy = tray_proxy.clone();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = menu_proxy.send_event(TrayCommand::Menu(event));
    }));
    let icon_proxy = tray_proxy.clone();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = icon_proxy.send_event(TrayCommand::Icon(event));
    }));

    let mut startup = Some((config, lifecycle_rx));

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::Window(command) => ProxyWindow::apply(&window, command),
                TrayCommand::Menu(event) => {
                    handlers.dispatch_menu(&event.id);
                }
                TrayCommand::Icon(event) => {
                    if let Some(click) = TrayClick::from_event(&event) {
                        handlers.dispatch_click(click);
                    }
                }
                TrayCommand::Pump => trace!("Event loop pumped"),
                TrayCommand::Exit(code) => {
                    info!(code, "Leaving event loop");
                    if tray_manager.is_built() {
                        tray_manager.apply(TrayCommand::Destroy);
                    }
                    log_guard.take();
                    *control_flow = ControlFlow::ExitWithCode(code);
                }
                other => tray_manager.apply(other),
            },
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                // Closing the window only hides it; the tray keeps running.
                window.set_visible(false);
            }
            Event::NewEvents(StartCause::Init) => {
                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                if let Some((config, lifecycle_rx)) = startup.take() {
                    spawn_runtime(
                        config,
                        lifecycle_rx,
                        tray_proxy.clone(),
                        Arc::clone(&handlers),
                        Arc::clone(&dialogs),
                    );
                }
            }
            _ => {}
        }
    });
}

/// Spawn the tokio runtime on its own thread and run the `App` there.
///
/// The tray manager and window stay on the main thread.
fn spawn_runtime(
    config: Config,
    lifecycle_rx: Receiver<HostLifecycle>,
    tray_proxy: EventLoopProxy<TrayCommand>,
    handlers: Arc<TrayHandlers>,
    dialogs: Arc<dyn DialogPresenter>,
) {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {:?}", e);
                dialogs.show_error(APP_NAME, &format!("Failed to start.\n\n{}", e));
                let _ = tray_proxy.send_event(TrayCommand::Exit(1));
                return;
            }
        };

        let host = Arc::new(ProxyTrayHost::new(
            tray_proxy.clone(),
            handlers,
            lifecycle_rx,
        ));
        let window = Arc::new(ProxyWindow::new(tray_proxy.clone()));
        let settings = config.controller_settings(Arc::from(TRAY_ICON));
        let controller = Arc::new(TrayController::new(
            host,
            window,
            settings,
            rt.handle().clone(),
        ));

        let (command_tx, command_rx) = mpsc::channel(8);
        controller.set_quit_callback(move || {
            if let Err(e) = command_tx.try_send(AppCommand::Shutdown) {
                warn!(error = ?e, "Failed to request shutdown");
            }
        });

        let app = App {
            controller,
            dialogs,
            tray_proxy,
            command_rx,
            ready_timeout: config.ready_timeout(),
            app_name: APP_NAME.to_string(),
        };

        rt.block_on(async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        });
    });
}
