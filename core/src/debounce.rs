//! Keyed debounce timers.
//!
//! [`Debouncer::schedule`] spawns the work behind a sleep and hands back a
//! [`DebounceHandle`]. Dropping or cancelling the handle aborts the work if it
//! has not run yet, so the owner of a key keeps at most one pending timer by
//! simply replacing its handle.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Runs `task` once `delay` has elapsed, unless the returned handle is
    /// cancelled or dropped first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<K, F>(&self, key: K, task: F) -> DebounceHandle<K>
    where
        K: Debug,
        F: Future<Output = ()> + Send + 'static,
    {
        let delay: Duration = self.delay;
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        trace!("debounce scheduled for {key:?} in {delay:?}");

        DebounceHandle {
            key,
            abort: join.abort_handle(),
        }
    }
}

/// Cancel handle for one scheduled debounce. Cancels on drop.
#[derive(Debug)]
pub struct DebounceHandle<K: Debug> {
    key: K,
    abort: AbortHandle,
}

impl<K: Debug> DebounceHandle<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn cancel(&self) {
        if !self.abort.is_finished() {
            trace!("debounce cancelled for {:?}", self.key);
        }
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl<K: Debug> Drop for DebounceHandle<K> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
