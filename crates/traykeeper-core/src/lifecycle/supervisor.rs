//! Spawn helpers that keep task faults inside the task.
//!
//! Nothing awaits detached tasks, so each one gets a watcher that logs its
//! outcome. A panic is reported and swallowed; it never reaches the runtime
//! or the caller.

use crate::CoreResult;

use std::future::Future;

use tokio::runtime::Handle;
use tracing::{debug, error, warn};

/// Spawn a fire-and-forget task whose errors and panics are logged.
pub(crate) fn spawn_detached<F>(runtime: &Handle, name: &'static str, task: F)
where
    F: Future<Output = CoreResult<()>> + Send + 'static,
{
    let handle = runtime.spawn(task);

    runtime.spawn(async move {
        match handle.await {
            Ok(Ok(())) => debug!(task = name, "Task finished"),
            Ok(Err(e)) => warn!(task = name, error = ?e, "Task failed"),
            Err(e) if e.is_panic() => error!(task = name, "Task panicked"),
            Err(_) => debug!(task = name, "Task cancelled"),
        }
    });
}

/// Run blocking work on the blocking pool; call `on_panic` if it panics.
pub(crate) fn spawn_blocking_supervised<F, P>(
    runtime: &Handle,
    name: &'static str,
    work: F,
    on_panic: P,
) where
    F: FnOnce() + Send + 'static,
    P: FnOnce() + Send + 'static,
{
    let handle = runtime.spawn_blocking(work);

    runtime.spawn(async move {
        match handle.await {
            Ok(()) => debug!(task = name, "Blocking task returned"),
            Err(e) if e.is_panic() => {
                error!(task = name, "Blocking task panicked");
                on_panic();
            }
            Err(_) => debug!(task = name, "Blocking task cancelled"),
        }
    });
}
