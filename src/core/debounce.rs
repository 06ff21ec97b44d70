//! Debounced actions
//!
//! [`debounce`] schedules an action after a quiet period and hands back a
//! cancel-capable handle. [`Debouncer`] keeps at most one pending action and
//! replaces it on every trigger.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// A scheduled action that has not necessarily run yet
#[derive(Debug)]
pub struct DebounceHandle {
    task: JoinHandle<()>,
}

impl DebounceHandle {
    /// Cancel the action if it has not started yet. An action already
    /// running is aborted at its next await point.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Run `action` once `delay` has elapsed, unless cancelled first
pub fn debounce<F, Fut>(delay: Duration, action: F) -> DebounceHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action().await;
    });
    DebounceHandle { task }
}

/// Owns the single pending action of a component
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<DebounceHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action`, cancelling whatever was pending
    pub fn trigger<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                debug!("Replacing pending debounced action");
            }
            previous.cancel();
        }
        *pending = Some(debounce(self.delay, action));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
