//! # Execution handle.
//!
//! An [`Execution`] is the caller-side handle of one running task and the
//! task-side context it runs with. Both sides share the same state:
//!
//! ```text
//!   caller                       task
//!   ──────                       ────
//!   end()      ──► token ──►     is_ended() / sleep(d) returns false
//!   done().await ◄── latch ◄──   (set by the supervisor after removal)
//!   error()    ◄── slot  ◄──     set_error(e)
//! ```
//!
//! ## Rules
//! - `end()` only requests cancellation; the task observes it cooperatively.
//! - `done()` resolves after the task returned **and** left its registry.
//! - Clones are the same handle: equality is by identity.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::core::clock::{Clock, SystemClock};
use crate::error::TaskError;

struct Inner {
    cancel: CancellationToken,
    done: CancellationToken,
    error: Mutex<Option<TaskError>>,
    clock: Arc<dyn Clock>,
}

/// Handle to one running (or finished) task.
#[derive(Clone)]
pub struct Execution {
    inner: Arc<Inner>,
}

impl Execution {
    pub(crate) fn new(cancel: CancellationToken, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancel,
                done: CancellationToken::new(),
                error: Mutex::new(None),
                clock,
            }),
        }
    }

    /// Creates an execution that belongs to no supervisor.
    ///
    /// Used to run one-shot actions inline; call [`finish`](Self::finish)
    /// once the action has returned.
    pub fn standalone(clock: Arc<dyn Clock>) -> Self {
        Self::new(CancellationToken::new(), clock)
    }

    /// Standalone execution on the system clock.
    pub fn detached() -> Self {
        Self::standalone(Arc::new(SystemClock))
    }

    /// Requests cancellation. Idempotent.
    pub fn end(&self) {
        self.inner.cancel.cancel();
    }

    /// Returns true once cancellation was requested.
    pub fn is_ended(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Resolves when cancellation is requested.
    pub async fn ended(&self) {
        self.inner.cancel.cancelled().await;
    }

    /// Waits until the task has fully stopped.
    pub async fn done(&self) {
        self.inner.done.cancelled().await;
    }

    /// Returns true if the task has fully stopped.
    pub fn is_done(&self) -> bool {
        self.inner.done.is_cancelled()
    }

    /// Marks the execution as fully stopped.
    pub fn finish(&self) {
        self.inner.done.cancel();
    }

    /// The error the task stopped with, if any.
    pub fn error(&self) -> Option<TaskError> {
        self.inner
            .error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Records an error; the latest one wins.
    pub fn set_error(&self, err: TaskError) {
        *self.inner.error.lock().unwrap_or_else(|e| e.into_inner()) = Some(err);
    }

    /// Current time according to the execution's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    /// Sleeps for `d` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed, `false` if the execution
    /// was ended (before or during the sleep).
    pub async fn sleep(&self, d: Duration) -> bool {
        if self.is_ended() {
            return false;
        }
        tokio::select! {
            _ = self.inner.cancel.cancelled() => false,
            _ = tokio::time::sleep(d) => true,
        }
    }
}

impl PartialEq for Execution {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Execution {}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("ended", &self.is_ended())
            .field("done", &self.is_done())
            .field("error", &self.error())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sleep_is_cut_short_by_end() {
        let exec = Execution::detached();
        let sleeper = exec.clone();
        let handle = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(60)).await });

        exec.end();
        assert!(!handle.await.unwrap());
        assert!(exec.is_ended());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_completes() {
        let exec = Execution::detached();
        assert!(exec.sleep(Duration::from_secs(5)).await);
        assert!(!exec.is_ended());
    }

    #[tokio::test]
    async fn ended_execution_does_not_sleep() {
        let exec = Execution::detached();
        exec.end();
        assert!(!exec.sleep(Duration::from_secs(60)).await);
    }

    #[tokio::test]
    async fn done_latch_and_error_slot() {
        let exec = Execution::detached();
        assert!(!exec.is_done());
        assert_eq!(exec.error(), None);

        exec.set_error(TaskError::fail("boom"));
        exec.finish();
        exec.done().await;

        assert!(exec.is_done());
        assert_eq!(exec.error(), Some(TaskError::fail("boom")));
    }

    #[test]
    fn equality_is_identity() {
        let a = Execution::detached();
        let b = Execution::detached();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
