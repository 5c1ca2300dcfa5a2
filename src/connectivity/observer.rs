//! Connectivity observer

use super::sources::ReachabilitySource;
use futures::StreamExt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type Callback = Arc<dyn Fn() + Send + Sync>;

/// What a reachability notification did to the flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// false -> true
    Restored,
    /// true -> false
    Lost,
    /// Flag did not change
    Unchanged,
}

#[derive(Default)]
struct Shared {
    reachable: bool,
    on_restored: Option<Callback>,
    on_lost: Option<Callback>,
}

/// Tracks reachability and fires callbacks on transitions
pub struct ConnectivityObserver {
    source: Arc<dyn ReachabilitySource>,
    shared: Arc<Mutex<Shared>>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectivityObserver {
    /// Create an observer; the flag starts from the source's one-shot check
    pub fn new(source: Arc<dyn ReachabilitySource>) -> Self {
        let reachable = source.check();
        debug!("Initial reachability: {}", reachable);
        Self {
            source,
            shared: Arc::new(Mutex::new(Shared {
                reachable,
                ..Shared::default()
            })),
            monitor: Mutex::new(None),
        }
    }

    pub fn is_reachable(&self) -> bool {
        lock(&self.shared).reachable
    }

    /// Replace the callbacks and restart monitoring
    ///
    /// The current reachability flag is kept. Monitoring needs a tokio
    /// runtime; without one the callbacks only fire through `handle_change`.
    pub fn register_callbacks<R, L>(&self, on_restored: R, on_lost: L)
    where
        R: Fn() + Send + Sync + 'static,
        L: Fn() + Send + Sync + 'static,
    {
        {
            let mut shared = lock(&self.shared);
            shared.on_restored = Some(Arc::new(on_restored));
            shared.on_lost = Some(Arc::new(on_lost));
        }
        self.start_monitoring();
    }

    /// Apply a reachability notification
    ///
    /// Fires `restored` only on false -> true and `lost` only on
    /// true -> false.
    pub fn handle_change(&self, reachable: bool) -> Transition {
        apply_change(&self.shared, reachable)
    }

    /// Stop consuming notifications from the source
    pub fn stop_monitoring(&self) {
        if let Some(task) = lock(&self.monitor).take() {
            task.abort();
        }
    }

    fn start_monitoring(&self) {
        self.stop_monitoring();

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; reachability changes will not be monitored");
            return;
        };

        let mut changes = self.source.changes();
        let shared: Weak<Mutex<Shared>> = Arc::downgrade(&self.shared);
        let task = runtime.spawn(async move {
            while let Some(reachable) = changes.next().await {
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                apply_change(&shared, reachable);
            }
            debug!("Reachability monitoring ended");
        });
        *lock(&self.monitor) = Some(task);
    }
}

impl Drop for ConnectivityObserver {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}

impl std::fmt::Debug for ConnectivityObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityObserver")
            .field("reachable", &self.is_reachable())
            .finish_non_exhaustive()
    }
}

fn apply_change(shared: &Mutex<Shared>, reachable: bool) -> Transition {
    // Callbacks run after the lock is released so they may query the observer
    let (transition, callback) = {
        let mut shared = lock(shared);
        let was_reachable = shared.reachable;
        shared.reachable = reachable;

        match (was_reachable, reachable) {
            (false, true) => (Transition::Restored, shared.on_restored.clone()),
            (true, false) => (Transition::Lost, shared.on_lost.clone()),
            _ => (Transition::Unchanged, None),
        }
    };

    match transition {
        Transition::Restored => info!("Network connection restored"),
        Transition::Lost => warn!("Network connection lost"),
        Transition::Unchanged => {}
    }

    if let Some(callback) = callback {
        callback();
    }
    transition
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
