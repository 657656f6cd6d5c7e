//! # Timed promotion task.
//!
//! A [`TimedTask`] waits until its start time and then hands its action to an
//! [`Executor`] with [`Executor::start`]. It is what a
//! [`Timer`](crate::Timer) tracks.
//!
//! - identity: `<action id>:<unix seconds>:<lights>`, e.g. `21:1300003953:5,7`
//! - never conflicts with another timed task
//! - a start time already in the past makes the task a no-op

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::controller::Executor;
use crate::core::Execution;
use crate::error::TaskError;
use crate::lights::LightSet;
use crate::tasks::{Action, Task};
use crate::time::format_time_left;

/// An action waiting to be started on an executor at a given time.
pub struct TimedTask<C> {
    action: Action<C>,
    lights: LightSet,
    executor: Executor<C>,
    start_time: DateTime<Utc>,
}

impl<C: Send + Sync + 'static> TimedTask<C> {
    pub fn new(
        action: Action<C>,
        lights: LightSet,
        executor: Executor<C>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            action,
            lights,
            executor,
            start_time,
        }
    }

    pub fn action(&self) -> &Action<C> {
        &self.action
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Time remaining before the action is started, negative once due.
    pub fn time_left(&self, now: DateTime<Utc>) -> TimeDelta {
        self.start_time - now
    }

    /// Remaining time as `H:MM:SS` or `M:SS`; see [`format_time_left`].
    pub fn time_left_str(&self, now: DateTime<Utc>) -> String {
        format_time_left(self.time_left(now))
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> Task for TimedTask<C> {
    fn task_id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.action.id(),
            self.start_time.timestamp(),
            self.lights
        )
    }

    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    async fn run(&self, exec: &Execution) -> Result<(), TaskError> {
        let Ok(delay) = self.time_left(exec.now()).to_std() else {
            return Ok(());
        };
        if delay.is_zero() {
            return Ok(());
        }
        if exec.sleep(delay).await {
            let started = self.executor.start(self.action.clone(), &self.lights).await;
            tracing::debug!(
                task = %self.task_id(),
                started = started.is_some(),
                "timer fired"
            );
        }
        Ok(())
    }
}

impl<C> fmt::Debug for TimedTask<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedTask")
            .field("action", &self.action)
            .field("lights", &self.lights)
            .field("start_time", &self.start_time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::ActionFn;
    use chrono::TimeZone;

    #[tokio::test]
    async fn identity_and_countdown() {
        let now = Utc.timestamp_opt(1_300_000_000, 0).unwrap();
        let action = ActionFn::action(21, "Wake", |_l: LightSet, _e: Execution| async {
            Ok::<_, TaskError>(())
        });
        let executor = Executor::new(());
        let start = now + TimeDelta::hours(1) + TimeDelta::minutes(5) + TimeDelta::seconds(53);
        let task = TimedTask::new(action, LightSet::new([5, 7]), executor.clone(), start);

        assert_eq!(task.task_id(), "21:1300003953:5,7");
        assert_eq!(task.time_left_str(now), "1:05:54");
        assert_eq!(task.time_left_str(start), "0:01");
        assert_eq!(task.time_left_str(start + TimeDelta::seconds(1)), "0:00");
        assert!(!task.conflicts_with(&task));
        executor.close().await;
    }
}
