//! Message pump and keep-alive loops.
//!
//! Some host shells stop delivering click and hover events to a tray icon
//! that has been idle for a while. Two loops keep it alive:
//!
//! - the **pump** loop (short period) drains one deferred action and polls
//!   the platform event queue every tick;
//! - the **keep-alive** loop (long period) re-applies the tooltip every tick
//!   and the icon every Nth tick.
//!
//! Both exit on the session's shutdown token or when the run flag drops.

use crate::{
    ActionQueue, TrayHost,
    lifecycle::{ControllerState, spawn_detached},
};

use std::{sync::Arc, time::Duration};

use tokio::{
    runtime::Handle,
    time::{self, Interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Values the loops need from the controller settings.
#[derive(Debug, Clone)]
pub(crate) struct LivenessSettings {
    pub(crate) pump_interval: Duration,
    pub(crate) keep_alive_interval: Duration,
    pub(crate) icon_refresh_every: u32,
    pub(crate) tooltip: String,
    pub(crate) icon: Arc<[u8]>,
}

pub(crate) struct LivenessPump {
    host: Arc<dyn TrayHost>,
    state: Arc<ControllerState>,
    actions: Arc<ActionQueue>,
    settings: LivenessSettings,
}

impl LivenessPump {
    pub(crate) fn new(
        host: Arc<dyn TrayHost>,
        state: Arc<ControllerState>,
        actions: Arc<ActionQueue>,
        settings: LivenessSettings,
    ) -> Self {
        Self {
            host,
            state,
            actions,
            settings,
        }
    }

    /// Spawn both loops for one session.
    pub(crate) fn launch(self: Arc<Self>, runtime: &Handle, shutdown: CancellationToken) {
        let pump = Arc::clone(&self);
        let pump_shutdown = shutdown.clone();

        spawn_detached(runtime, "message_pump", async move {
            pump.pump_loop(pump_shutdown).await;
            Ok(())
        });

        spawn_detached(runtime, "keep_alive", async move {
            self.keep_alive_loop(shutdown).await;
            Ok(())
        });
    }

    pub(crate) async fn pump_loop(&self, shutdown: CancellationToken) {
        let mut interval = Self::interval(self.settings.pump_interval).await;
        debug!(period = ?self.settings.pump_interval, "Message pump started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    if self.should_stop(&shutdown) {
                        break;
                    }

                    self.actions.run_next();

                    if let Err(e) = self.host.poll_events() {
                        warn!(error = ?e, "Failed to poll tray events");
                    }
                }
            }
        }

        debug!("Message pump stopped");
    }

    pub(crate) async fn keep_alive_loop(&self, shutdown: CancellationToken) {
        let mut interval = Self::interval(self.settings.keep_alive_interval).await;
        let mut refresh_count: u64 = 0;
        debug!(period = ?self.settings.keep_alive_interval, "Keep-alive started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    if self.should_stop(&shutdown) {
                        break;
                    }

                    refresh_count += 1;
                    self.refresh(refresh_count);
                }
            }
        }

        debug!(refresh_count, "Keep-alive stopped");
    }

    fn refresh(&self, tick: u64) {
        if !self.state.is_ready() {
            return;
        }

        if let Err(e) = self.host.set_tooltip(&self.settings.tooltip) {
            warn!(error = ?e, "Failed to refresh tray tooltip");
        }

        let every = u64::from(self.settings.icon_refresh_every);
        if every != 0 && tick % every == 0 && !self.settings.icon.is_empty() {
            trace!(tick, "Refreshing tray icon");
            if let Err(e) = self.host.set_icon(&self.settings.icon) {
                warn!(error = ?e, "Failed to refresh tray icon");
            }
        }
    }

    fn should_stop(&self, shutdown: &CancellationToken) -> bool {
        shutdown.is_cancelled() || !self.state.is_running()
    }

    /// Interval with its immediate first tick already consumed.
    async fn interval(period: Duration) -> Interval {
        let mut interval = time::interval(period.max(MIN_PERIOD));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;
        interval
    }
}
