//! # Timer: starts actions on an executor at a given time.
//!
//! ```text
//! schedule(action, lights, when)
//!   used = action.used_lights(lights)        none → None
//!   Supervisor<TimedTask>::start(TimedTask{action, used, executor, when})
//!        └─► sleep until `when` (cancellable) ─► executor.start(action, used)
//!
//! cancel(id) → end the timed task and wait; the action never starts
//! ```
//!
//! Timed tasks never conflict with each other; any number may be pending.
//! A firing timer uses [`Executor::start`], so it does not wait for lights to be free.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::controller::{Executor, ScheduledView};
use crate::core::{Execution, Supervisor};
use crate::lights::LightSet;
use crate::tasks::{Action, Task, TimedTask};

/// Cheaply cloneable handle to the scheduler of one executor.
pub struct Timer<C> {
    sup: Arc<Supervisor<TimedTask<C>>>,
    executor: Executor<C>,
}

impl<C: Send + Sync + 'static> Timer<C> {
    /// Creates a timer feeding `executor`, reading time from the executor's clock.
    pub fn new(executor: Executor<C>) -> Self {
        let clock = executor.supervisor().clock();
        Self {
            sup: Arc::new(Supervisor::new(clock)),
            executor,
        }
    }

    /// The executor actions are started on.
    pub fn executor(&self) -> &Executor<C> {
        &self.executor
    }

    /// Arranges for `action` to start at `when` on the lights it uses out of `lights`.
    ///
    /// Returns `None` if it uses no lights or the timer is closed.
    /// A `when` in the past yields a task that finishes without starting anything.
    pub async fn schedule(
        &self,
        action: Action<C>,
        lights: &LightSet,
        when: DateTime<Utc>,
    ) -> Option<Execution> {
        let used = action.used_lights(lights);
        if used.is_none() {
            tracing::debug!(
                action = action.id(),
                requested = %lights,
                "schedule declined: no lights"
            );
            return None;
        }
        let task = Arc::new(TimedTask::new(action, used, self.executor.clone(), when));
        tracing::debug!(task = %task.task_id(), %when, "scheduled");
        self.sup.start(task).await
    }

    /// Snapshot of the pending timed tasks in scheduling order.
    pub async fn scheduled(&self) -> Vec<Arc<TimedTask<C>>> {
        self.sup.registry().tasks().await
    }

    /// [`scheduled`](Self::scheduled) rendered for display, with countdowns as of now.
    pub async fn views(&self) -> Vec<ScheduledView> {
        let now = self.sup.clock().now();
        self.scheduled()
            .await
            .iter()
            .map(|t| ScheduledView::new(t.as_ref(), now))
            .collect()
    }

    /// Cancels the pending task with this identity and waits for it to stop.
    ///
    /// Returns `false` if no such task is pending.
    pub async fn cancel(&self, task_id: &str) -> bool {
        self.sup.stop(task_id).await
    }

    /// Cancels every pending task and refuses further scheduling. Idempotent.
    ///
    /// The executor is left running.
    pub async fn close(&self) {
        self.sup.close().await;
    }
}

impl<C> Clone for Timer<C> {
    fn clone(&self) -> Self {
        Self {
            sup: Arc::clone(&self.sup),
            executor: self.executor.clone(),
        }
    }
}
