//! Small synchronization helpers shared by the components

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

/// Lock a std mutex, recovering the data if a holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reloads spawned from event handlers
///
/// Handlers are synchronous and may run on any thread, so a reload they
/// trigger is spawned on the runtime the component was mounted on (see
/// [`ReloadTasks::bind_current`]), falling back to the caller's runtime.
/// Tasks are neither cancelled nor coalesced; `wait_idle` lets callers
/// wait for everything spawned so far.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReloadTasks {
    runtime: Arc<Mutex<Option<Handle>>>,
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ReloadTasks {
    /// Remember the runtime of the calling task for later spawns
    pub(crate) fn bind_current(&self) {
        match Handle::try_current() {
            Ok(handle) => *lock(&self.runtime) = Some(handle),
            Err(_) => warn!("Mounted outside an async runtime; reloads use the broadcaster's"),
        }
    }

    /// Spawn `task` on the bound runtime, or the current one; returns false if there is neither
    pub(crate) fn spawn<F>(&self, what: &str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bound = lock(&self.runtime).clone();
        match bound.map_or_else(Handle::try_current, Ok) {
            Ok(handle) => {
                let mut handles = lock(&self.handles);
                handles.retain(|h| !h.is_finished());
                handles.push(handle.spawn(task));
                true
            }
            Err(_) => {
                warn!("No async runtime available; skipping {} reload", what);
                false
            }
        }
    }

    /// Wait until every spawned reload, including ones spawned meanwhile, has finished
    pub(crate) async fn wait_idle(&self) {
        loop {
            let pending: Vec<JoinHandle<()>> = lock(&self.handles).drain(..).collect();
            if pending.is_empty() {
                break;
            }
            for handle in pending {
                if let Err(err) = handle.await {
                    warn!("Reload task failed: {}", err);
                }
            }
        }
    }
}
