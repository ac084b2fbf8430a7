use crate::{
    ActionQueue, TrayHost,
    lifecycle::ControllerState,
    liveness::{LivenessPump, LivenessSettings},
    tests::fakes::{FakeTrayHost, HostCall, eventually},
};

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio_util::sync::CancellationToken;

const WAIT: Duration = Duration::from_secs(2);

struct PumpFixture {
    pump: Arc<LivenessPump>,
    host: Arc<FakeTrayHost>,
    state: Arc<ControllerState>,
    actions: Arc<ActionQueue>,
    shutdown: CancellationToken,
}

#[allow(clippy::unwrap_used)]
fn fixture(icon_refresh_every: u32) -> PumpFixture {
    let host = FakeTrayHost::new();
    let state = Arc::new(ControllerState::new());
    let session = state.try_start().unwrap();
    assert!(state.mark_ready(session.id));
    let actions = Arc::new(ActionQueue::new(10));

    let pump = Arc::new(LivenessPump::new(
        Arc::clone(&host) as Arc<dyn TrayHost>,
        Arc::clone(&state),
        Arc::clone(&actions),
        LivenessSettings {
            pump_interval: Duration::from_millis(10),
            keep_alive_interval: Duration::from_millis(20),
            icon_refresh_every,
            tooltip: "keep alive".to_string(),
            icon: Arc::from(vec![1u8, 2, 3]),
        },
    ));

    PumpFixture {
        pump,
        host,
        state,
        actions,
        shutdown: session.shutdown,
    }
}

fn tooltips(host: &FakeTrayHost) -> usize {
    host.count(|c| matches!(c, HostCall::SetTooltip(_)))
}

fn icons(host: &FakeTrayHost) -> usize {
    host.count(|c| *c == HostCall::SetIcon)
}

/// WHAT: Each pump tick runs one queued action and polls the host
/// WHY: Deferred work must run on the pump cadence, not in a burst
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_queued_actions_when_pump_ticks_then_actions_run_in_order() {
    // Given: Three queued actions
    let f = fixture(10);
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    for i in 0..3 {
        let order = Arc::clone(&order);
        f.actions
            .enqueue(Box::new(move || order.lock().unwrap().push(i)))
            .unwrap();
    }

    // When: The pump runs
    let pump = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let handle = tokio::spawn(async move { pump.pump_loop(token).await });

    // Then: All ran in FIFO order and events were polled
    assert!(eventually(WAIT, || order.lock().unwrap().len() == 3).await);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    assert!(f.host.count(|c| *c == HostCall::PollEvents) >= 3);

    f.shutdown.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}

/// WHAT: Both loops stop promptly once shutdown fires
/// WHY: Shutdown latency is bounded by one tick
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_running_loops_when_shutdown_fires_then_both_stop_and_stay_quiet() {
    // Given: Both loops running
    let f = fixture(1);
    let pump = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let pump_handle = tokio::spawn(async move { pump.pump_loop(token).await });
    let keep_alive = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let keep_alive_handle = tokio::spawn(async move { keep_alive.keep_alive_loop(token).await });
    assert!(eventually(WAIT, || tooltips(&f.host) >= 2).await);

    // When: The shutdown signal fires
    assert!(f.state.try_stop());

    // Then: Both tasks finish within a tick or two
    tokio::time::timeout(Duration::from_millis(100), pump_handle)
        .await
        .unwrap()
        .unwrap();
    tokio::time::timeout(Duration::from_millis(100), keep_alive_handle)
        .await
        .unwrap()
        .unwrap();

    // And: Nothing else is drained or refreshed afterwards
    let ran = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ran);
    f.actions
        .enqueue(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();
    let calls_before = f.host.calls().len();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(ran.load(Ordering::SeqCst), 0);
    assert_eq!(f.host.calls().len(), calls_before);
    assert_eq!(f.actions.len(), 1);
}

/// WHAT: The loops also stop when only the run flag drops
/// WHY: A missed signal must not leave the loops running forever
#[tokio::test]
async fn given_unrelated_token_when_run_flag_drops_then_loops_stop() {
    // Given: Loops watching a token that never fires
    let f = fixture(10);
    let detached = CancellationToken::new();
    let pump = Arc::clone(&f.pump);
    let token = detached.clone();
    let pump_handle = tokio::spawn(async move { pump.pump_loop(token).await });
    let keep_alive = Arc::clone(&f.pump);
    let keep_alive_handle = tokio::spawn(async move { keep_alive.keep_alive_loop(detached).await });

    // When: The run flag drops
    assert!(f.state.try_stop());

    // Then: Both exit on their next tick
    assert!(tokio::time::timeout(WAIT, pump_handle).await.is_ok());
    assert!(tokio::time::timeout(WAIT, keep_alive_handle).await.is_ok());
}

/// WHAT: Keep-alive refreshes the tooltip every tick and the icon every Nth
/// WHY: The icon refresh is heavier and runs at a lower cadence
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_ready_tray_when_keep_alive_ticks_then_icon_refreshed_every_nth() {
    // Given: Icon refresh every 3rd tick
    let f = fixture(3);
    let keep_alive = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let handle = tokio::spawn(async move { keep_alive.keep_alive_loop(token).await });

    // When: At least six ticks pass
    assert!(eventually(WAIT, || tooltips(&f.host) >= 6).await);
    f.shutdown.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();

    // Then: One icon refresh per three tooltip refreshes
    let tooltip_count = tooltips(&f.host);
    assert_eq!(icons(&f.host), tooltip_count / 3);
    assert!(
        f.host
            .calls()
            .iter()
            .all(|c| !matches!(c, HostCall::SetTooltip(t) if t != "keep alive"))
    );
}

/// WHAT: Icon refresh can be disabled with zero
/// WHY: Some shells flicker when the icon is re-applied
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_icon_refresh_disabled_when_keep_alive_ticks_then_only_tooltip() {
    // Given: icon_refresh_every = 0
    let f = fixture(0);
    let keep_alive = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let handle = tokio::spawn(async move { keep_alive.keep_alive_loop(token).await });

    // When: Several ticks pass
    assert!(eventually(WAIT, || tooltips(&f.host) >= 3).await);
    f.shutdown.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();

    // Then: Never touched the icon
    assert_eq!(icons(&f.host), 0);
}

/// WHAT: Keep-alive skips refreshes while the tray is not ready
/// WHY: Touching a tray that does not exist yet is pointless
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_tray_not_ready_when_keep_alive_ticks_then_nothing_refreshed() {
    // Given: A running session whose ready flag is cleared
    let host = FakeTrayHost::new();
    let state = Arc::new(ControllerState::new());
    let session = state.try_start().unwrap();
    let pump = LivenessPump::new(
        Arc::clone(&host) as Arc<dyn TrayHost>,
        Arc::clone(&state),
        Arc::new(ActionQueue::new(1)),
        LivenessSettings {
            pump_interval: Duration::from_millis(10),
            keep_alive_interval: Duration::from_millis(10),
            icon_refresh_every: 1,
            tooltip: "keep alive".to_string(),
            icon: Arc::from(vec![1u8]),
        },
    );

    // When: The loop ticks for a while
    let token = session.shutdown.clone();
    let run = pump.keep_alive_loop(token);
    let _ = tokio::time::timeout(Duration::from_millis(80), run).await;

    // Then: No refresh happened
    assert!(host.calls().is_empty());
    assert!(state.try_stop());
}

/// WHAT: A panicking action does not kill the pump
/// WHY: Faults stay inside the action
#[tokio::test]
#[allow(clippy::unwrap_used, clippy::panic)]
async fn given_panicking_action_when_pumped_then_next_action_still_runs() {
    // Given: A panicking action followed by a good one
    let f = fixture(10);
    let ran = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ran);
    f.actions.enqueue(Box::new(|| panic!("bad action"))).unwrap();
    f.actions
        .enqueue(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    // When: The pump runs
    let pump = Arc::clone(&f.pump);
    let token = f.shutdown.clone();
    let handle = tokio::spawn(async move { pump.pump_loop(token).await });

    // Then: The good action still ran
    assert!(eventually(WAIT, || ran.load(Ordering::SeqCst) == 1).await);

    f.shutdown.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}
