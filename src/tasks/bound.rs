//! # Bound action task.
//!
//! A [`BoundTask`] is an [`Action`] bound to the exact lights it drives, plus
//! the context it runs with. This is what an [`Executor`](crate::Executor)
//! starts and tracks.
//!
//! ## Identity and conflicts
//! - identity: `<action id>:<lights>`, e.g. `17:1,3` or `50:All`
//! - two bound tasks conflict iff their light sets overlap
//!
//! ## Reporting
//! ```text
//! run(exec)
//!   ├─► emit ActionStarting
//!   ├─► action.execute(ctx, lights, exec)
//!   └─► error recorded?      → ActionFailed{reason}
//!       else exec ended?     → ActionInterrupted
//!       else                 → ActionFinished
//! ```
//! Events are emitted only when the task was built with subscribers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Execution;
use crate::error::TaskError;
use crate::events::{Event, EventKind};
use crate::lights::LightSet;
use crate::subscribers::SubscriberSet;
use crate::tasks::{Action, Task};

/// An action bound to a light set and a context.
pub struct BoundTask<C> {
    action: Action<C>,
    lights: LightSet,
    ctx: Arc<C>,
    subs: Option<Arc<SubscriberSet>>,
}

impl<C: Send + Sync + 'static> BoundTask<C> {
    pub fn new(action: Action<C>, lights: LightSet, ctx: Arc<C>) -> Self {
        Self {
            action,
            lights,
            ctx,
            subs: None,
        }
    }

    /// Reports lifecycle transitions to `subs`.
    pub fn with_subscribers(mut self, subs: Arc<SubscriberSet>) -> Self {
        self.subs = Some(subs);
        self
    }

    pub fn action(&self) -> &Action<C> {
        &self.action
    }

    /// The lights this task drives.
    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_task(self.task_id())
            .with_description(self.action.description())
            .with_lights(self.lights.to_string())
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> Task for BoundTask<C> {
    fn task_id(&self) -> String {
        format!("{}:{}", self.action.id(), self.lights)
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.lights.overlaps_with(&other.lights)
    }

    async fn run(&self, exec: &Execution) -> Result<(), TaskError> {
        let subs = self.subs.as_deref().filter(|s| !s.is_empty());
        if let Some(subs) = subs {
            subs.emit(self.event(EventKind::ActionStarting));
        }
        tracing::debug!(task = %self, "action starting");

        let res = self.action.execute(&self.ctx, &self.lights, exec).await;

        let failure = match &res {
            Err(TaskError::Canceled) | Ok(()) => exec.error(),
            Err(e) => Some(e.clone()),
        };
        let ev = match failure {
            Some(err) => {
                tracing::debug!(task = %self, error = %err, "action failed");
                self.event(EventKind::ActionFailed).with_reason(err.to_string())
            }
            None if exec.is_ended() || matches!(res, Err(TaskError::Canceled)) => {
                tracing::debug!(task = %self, "action interrupted");
                self.event(EventKind::ActionInterrupted)
            }
            None => {
                tracing::debug!(task = %self, "action finished");
                self.event(EventKind::ActionFinished)
            }
        };
        if let Some(subs) = subs {
            subs.emit(ev);
        }
        res
    }
}

impl<C> fmt::Display for BoundTask<C> {
    /// `{id, description, lights}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}}}",
            self.action.id(),
            self.action.description(),
            self.lights
        )
    }
}

impl<C> fmt::Debug for BoundTask<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundTask")
            .field("action", &self.action)
            .field("lights", &self.lights)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::ActionFn;

    fn noop(id: u64, lights: LightSet) -> BoundTask<()> {
        let action = ActionFn::action(id, "Noop", |_l: LightSet, _e: Execution| async {
            Ok::<_, TaskError>(())
        });
        BoundTask::new(action, lights, Arc::new(()))
    }

    // Display must not require `C: 'static`.
    fn describe<C>(task: &BoundTask<C>) -> String {
        task.to_string()
    }

    #[test]
    fn identity_and_display() {
        let t = noop(17, LightSet::new([3, 1]));
        assert_eq!(t.task_id(), "17:1,3");
        assert_eq!(describe(&t), "{17, Noop, 1,3}");
        assert_eq!(noop(50, LightSet::All).task_id(), "50:All");
    }

    #[test]
    fn conflicts_follow_overlap() {
        let a = noop(1, LightSet::new([1, 3]));
        let b = noop(2, LightSet::new([3, 4]));
        let c = noop(3, LightSet::new([5]));
        let all = noop(4, LightSet::All);

        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        assert!(all.conflicts_with(&c));
        assert!(c.conflicts_with(&all));
    }
}
