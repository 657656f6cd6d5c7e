//! # Executor: admits actions onto lights.
//!
//! The [`Executor`] owns one [`Supervisor`] of [`BoundTask`]s and decides how
//! each new action gets its lights.
//!
//! ## Entry points
//! ```text
//! start(action, lights)        used = action.used_lights(lights)
//!                              none → None, else run on `used` (others keep running)
//!
//! maybe_start(action, lights)  admit(action, lights, running lights)
//!                              Start(l)    → start(action, l)
//!                              Decline(_)  → None
//!
//! preempt(action, lights)      used = action.used_lights(lights)
//!                              end + await every running task overlapping `used`
//!                              run on `used`
//! ```
//!
//! ## Rules
//! - `start` never waits for or cancels running actions, so it may double-book lights.
//! - `maybe_start` never disturbs running actions.
//! - `maybe_start` reads the registry and then starts; two concurrent calls may
//!   both see a light as free.
//! - While paused every entry point returns `None`.

use std::sync::Arc;

use crate::controller::admission::{Admission, admit};
use crate::controller::{ActionView, ExecutorBuilder};
use crate::core::{Execution, Supervisor};
use crate::lights::LightSet;
use crate::subscribers::SubscriberSet;
use crate::tasks::{Action, BoundTask, Task};

/// Cheaply cloneable handle to an action executor.
pub struct Executor<C> {
    sup: Arc<Supervisor<BoundTask<C>>>,
    ctx: Arc<C>,
    subs: Option<Arc<SubscriberSet>>,
}

impl<C: Send + Sync + 'static> Executor<C> {
    /// Executor without subscribers, on the system clock.
    pub fn new(ctx: C) -> Self {
        ExecutorBuilder::new(ctx).build()
    }

    pub fn builder(ctx: C) -> ExecutorBuilder<C> {
        ExecutorBuilder::new(ctx)
    }

    pub(crate) fn from_parts(
        sup: Arc<Supervisor<BoundTask<C>>>,
        ctx: Arc<C>,
        subs: Option<Arc<SubscriberSet>>,
    ) -> Self {
        Self { sup, ctx, subs }
    }

    /// Context every action runs against.
    pub fn context(&self) -> &Arc<C> {
        &self.ctx
    }

    /// Subscribers actions report to, if any.
    pub fn subscribers(&self) -> Option<&Arc<SubscriberSet>> {
        self.subs.as_ref()
    }

    pub(crate) fn supervisor(&self) -> &Arc<Supervisor<BoundTask<C>>> {
        &self.sup
    }

    fn bind(&self, action: Action<C>, lights: LightSet) -> Arc<BoundTask<C>> {
        let task = BoundTask::new(action, lights, Arc::clone(&self.ctx));
        Arc::new(match &self.subs {
            Some(subs) => task.with_subscribers(Arc::clone(subs)),
            None => task,
        })
    }

    /// Starts `action` on the lights it uses out of `lights`.
    ///
    /// Returns `None` if it uses no lights or the executor is paused or closed.
    pub async fn start(&self, action: Action<C>, lights: &LightSet) -> Option<Execution> {
        let used = action.used_lights(lights);
        if used.is_none() {
            tracing::debug!(
                action = action.id(),
                requested = %lights,
                "start declined: no lights"
            );
            return None;
        }
        let task = self.bind(action, used);
        tracing::debug!(task = %task.task_id(), "starting");
        self.sup.start(task).await
    }

    /// Starts `action` only on lights no running action holds.
    ///
    /// The action may end up with fewer lights than requested.
    pub async fn maybe_start(&self, action: Action<C>, lights: &LightSet) -> Option<Execution> {
        let running: Vec<LightSet> = self
            .sup
            .registry()
            .tasks()
            .await
            .iter()
            .map(|t| t.lights().clone())
            .collect();

        match admit(&action, lights, &running) {
            Admission::Start(granted) => self.start(action, &granted).await,
            Admission::Decline(reason) => {
                tracing::debug!(
                    action = action.id(),
                    requested = %lights,
                    reason = reason.as_label(),
                    "maybe_start declined"
                );
                None
            }
        }
    }

    /// Ends every running action that overlaps the lights `action` uses,
    /// waits for them to stop, then starts `action`.
    pub async fn preempt(&self, action: Action<C>, lights: &LightSet) -> Option<Execution> {
        let used = action.used_lights(lights);
        if used.is_none() {
            return None;
        }
        let task = self.bind(action, used);
        self.sup.end_conflicting(&task).await;
        tracing::debug!(task = %task.task_id(), "starting after preemption");
        self.sup.start(task).await
    }

    /// Ends the action with this identity and waits for it to stop.
    ///
    /// Returns `false` if no such action is running.
    pub async fn stop(&self, task_id: &str) -> bool {
        self.sup.stop(task_id).await
    }

    /// Ends every running action and waits for them.
    ///
    /// New starts are refused until [`resume`](Self::resume).
    pub async fn pause(&self) {
        self.sup.pause().await;
    }

    pub async fn resume(&self) {
        self.sup.resume().await;
    }

    /// Snapshot of the running actions in start order.
    pub async fn tasks(&self) -> Vec<Arc<BoundTask<C>>> {
        self.sup.registry().tasks().await
    }

    /// [`tasks`](Self::tasks) rendered for display.
    pub async fn views(&self) -> Vec<ActionView> {
        self.tasks().await.iter().map(|t| ActionView::from(t.as_ref())).collect()
    }

    /// Ends everything and refuses further starts. Idempotent.
    pub async fn close(&self) {
        self.sup.close().await;
    }
}

impl<C> Clone for Executor<C> {
    fn clone(&self) -> Self {
        Self {
            sup: Arc::clone(&self.sup),
            ctx: Arc::clone(&self.ctx),
            subs: self.subs.clone(),
        }
    }
}
