//! Tracking of callbacks scheduled by a page.
//!
//! Every timer and frame loop a page starts is spawned through [`TaskSet`] so
//! that leaving the page can cancel whatever is still pending.

use std::future::Future;
use std::sync::Mutex;

use tokio::task::AbortHandle;

use crate::state::lock;

/// Spawned page callbacks.
#[derive(Debug, Default)]
pub struct TaskSet {
    handles: Mutex<Vec<AbortHandle>>,
}

impl TaskSet {
    /// Spawn a callback on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = lock(&self.handles);
        handles.retain(|h| !h.is_finished());
        handles.push(handle.abort_handle());
    }

    /// Callbacks that have not finished yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.handles)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Cancel every pending callback, returning how many were cancelled.
    pub fn abort_all(&self) -> usize {
        let mut handles = lock(&self.handles);
        let mut cancelled = 0;
        for handle in handles.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_abort_all_cancels_pending() {
        let tasks = TaskSet::default();
        tasks.spawn(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        tasks.spawn(async {});
        tokio::task::yield_now().await;

        assert_eq!(tasks.pending(), 1);
        assert_eq!(tasks.abort_all(), 1);
        tokio::task::yield_now().await;
        assert_eq!(tasks.pending(), 0);
    }
}
