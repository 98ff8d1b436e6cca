//! `tokio`-backed lifetime extender.
//!
//! Hosts call `settle_all` before letting the execution context go away, so
//! no scheduled cycle is cut off mid-fetch.

use crate::worker::dispatch::{HandlerTask, LifetimeExtender};
use log::warn;
use std::sync::{Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::task::JoinSet;

pub struct TaskTracker {
    handle: Handle,
    tasks: Mutex<JoinSet<()>>,
}

impl TaskTracker {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Tracker bound to the runtime of the calling task, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of tasks not yet reaped by `settle_all`.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Waits until every task scheduled so far, including ones scheduled
    /// while waiting, has settled. Returns how many settled.
    pub async fn settle_all(&self) -> usize {
        let mut settled = 0;
        loop {
            let mut batch = std::mem::replace(&mut *self.lock(), JoinSet::new());
            if batch.is_empty() {
                return settled;
            }
            while let Some(result) = batch.join_next().await {
                settled += 1;
                if let Err(err) = result {
                    warn!(
                        "event=task_settle module=worker status=error error={}",
                        err
                    );
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LifetimeExtender for TaskTracker {
    fn wait_until(&self, task: HandlerTask) {
        self.lock().spawn_on(task, &self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::TaskTracker;
    use crate::worker::dispatch::LifetimeExtender;
    use futures_util::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn settle_all_waits_for_every_scheduled_task() {
        let tracker = TaskTracker::current().expect("inside tokio runtime");
        let done = Arc::new(AtomicUsize::new(0));
        for delay_ms in [30_u64, 10, 20] {
            let done = done.clone();
            tracker.wait_until(
                async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    done.fetch_add(1, Ordering::SeqCst);
                }
                .boxed(),
            );
        }

        assert_eq!(tracker.settle_all().await, 3);
        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn settle_all_on_empty_tracker_returns_immediately() {
        let tracker = TaskTracker::current().expect("inside tokio runtime");
        assert_eq!(tracker.settle_all().await, 0);
    }
}
