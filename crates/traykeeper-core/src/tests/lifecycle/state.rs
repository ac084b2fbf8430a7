use crate::{LifecycleStatus, lifecycle::ControllerState};

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// WHAT: Only one concurrent try_start wins
/// WHY: Exactly one caller may observe the false -> true transition
#[test]
#[allow(clippy::unwrap_used)]
fn given_stopped_state_when_racing_try_start_then_single_winner() {
    // Given: A fresh state shared by many threads
    let state = Arc::new(ControllerState::new());
    let winners = Arc::new(AtomicUsize::new(0));

    // When: 32 threads race to start
    let threads: Vec<_> = (0..32)
        .map(|_| {
            let state = Arc::clone(&state);
            let winners = Arc::clone(&winners);
            std::thread::spawn(move || {
                if state.try_start().is_some() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    // Then: One winner, state is starting
    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert!(state.is_running());
    assert_eq!(state.status(), LifecycleStatus::Starting);
}

/// WHAT: Only one concurrent try_stop wins and the signal fires once
/// WHY: Closing the shutdown signal twice must be structurally impossible
#[test]
#[allow(clippy::unwrap_used)]
fn given_running_state_when_racing_try_stop_then_single_winner() {
    // Given: A started session
    let state = Arc::new(ControllerState::new());
    let session = state.try_start().unwrap();
    let winners = Arc::new(AtomicUsize::new(0));

    // When: 32 threads race to stop
    let threads: Vec<_> = (0..32)
        .map(|_| {
            let state = Arc::clone(&state);
            let winners = Arc::clone(&winners);
            std::thread::spawn(move || {
                if state.try_stop() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    // Then: One winner and the session token is cancelled
    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert!(session.shutdown.is_cancelled());
    assert!(state.is_shutdown_closed());
    assert_eq!(state.status(), LifecycleStatus::Stopping);
}

/// WHAT: A new session gets a fresh token; the old one stays cancelled
/// WHY: Restarting must not inherit a fired shutdown signal
#[test]
#[allow(clippy::unwrap_used)]
fn given_stopped_session_when_starting_again_then_fresh_token() {
    // Given: A session that was started, stopped and exited
    let state = ControllerState::new();
    let first = state.try_start().unwrap();
    assert!(state.try_stop());
    assert!(state.mark_exited(first.id));

    // When: Starting again
    let second = state.try_start().unwrap();

    // Then: Different sessions, only the first token fired
    assert_ne!(first.id, second.id);
    assert!(first.shutdown.is_cancelled());
    assert!(!second.shutdown.is_cancelled());
    assert!(!state.is_shutdown_closed());
}

/// WHAT: A stale exit callback does not reset a newer session
/// WHY: The previous tray may finish exiting after the next setup
#[test]
#[allow(clippy::unwrap_used)]
fn given_newer_session_when_stale_exit_arrives_then_flags_untouched() {
    // Given: First session stopped, second session ready
    let state = ControllerState::new();
    let first = state.try_start().unwrap();
    assert!(state.try_stop());
    let second = state.try_start().unwrap();
    assert!(state.mark_ready(second.id));

    // When: The first session's exit callback fires late
    let applied = state.mark_exited(first.id);

    // Then: Ignored
    assert!(!applied);
    assert!(state.is_running());
    assert!(state.is_ready());
    assert!(!second.shutdown.is_cancelled());
    assert_eq!(state.status(), LifecycleStatus::Running);
}

/// WHAT: Ready after stop is not recorded
/// WHY: A tray that comes up after quit must not look ready
#[test]
#[allow(clippy::unwrap_used)]
fn given_stopped_session_when_ready_arrives_then_not_ready() {
    // Given: A session stopped before its ready callback
    let state = ControllerState::new();
    let session = state.try_start().unwrap();
    assert!(state.try_stop());

    // When: The ready callback fires
    let applied = state.mark_ready(session.id);

    // Then: Ignored
    assert!(!applied);
    assert!(!state.is_ready());
    assert_eq!(state.status(), LifecycleStatus::Stopping);
}

/// WHAT: Exit clears both flags and closes the signal
/// WHY: The host stopping on its own must also stop the background loops
#[test]
#[allow(clippy::unwrap_used)]
fn given_ready_session_when_exited_then_flags_cleared_and_signal_closed() {
    // Given: A ready session
    let state = ControllerState::new();
    let session = state.try_start().unwrap();
    assert!(state.mark_ready(session.id));

    // When: The host exits
    assert!(state.mark_exited(session.id));

    // Then: Stopped, signal fired, and stopping again is a no-op
    assert!(!state.is_running());
    assert!(!state.is_ready());
    assert!(session.shutdown.is_cancelled());
    assert!(!state.try_stop());
    assert_eq!(state.status(), LifecycleStatus::Stopped);
}
