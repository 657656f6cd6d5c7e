//! # Standing schedules.
//!
//! A [`ScheduledTask`] is a rule such as "every day at 06:45, wake up lights
//! 1-3". While enabled it keeps a loop running in the background:
//!
//! ```text
//! loop {
//!   next = next local occurrence of hour:minute after now
//!   sleep until next           (ends early on disable)
//!   high priority? → executor.preempt(action, lights)
//!   else           → executor.maybe_start(action, lights)
//! }
//! ```
//!
//! A rule without a time of day fires once, as soon as it is enabled.
//!
//! The loop is one [`Task`] run by a [`BackgroundRunner`], which keeps at
//! most one instance of it alive.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use tokio::sync::Mutex;

use crate::controller::Executor;
use crate::core::{Execution, Supervisor};
use crate::error::{ScheduleError, TaskError};
use crate::lights::LightSet;
use crate::tasks::{Action, Task};
use crate::time::future_time;

/// Runs a single task in the background, at most one instance at a time.
pub struct BackgroundRunner<T> {
    task: Arc<T>,
    sup: Supervisor<T>,
    gate: Mutex<()>,
}

impl<T: Task> BackgroundRunner<T> {
    pub fn new(task: T, sup: Supervisor<T>) -> Self {
        Self {
            task: Arc::new(task),
            sup,
            gate: Mutex::new(()),
        }
    }

    pub fn task(&self) -> &Arc<T> {
        &self.task
    }

    /// Returns true while the task is running.
    pub async fn is_enabled(&self) -> bool {
        !self.sup.registry().is_empty().await
    }

    /// Starts the task unless it is already running.
    pub async fn enable(&self) {
        let _gate = self.gate.lock().await;
        if !self.is_enabled().await {
            self.sup.start(Arc::clone(&self.task)).await;
        }
    }

    /// Ends the task and waits for it to stop.
    pub async fn disable(&self) {
        let _gate = self.gate.lock().await;
        self.sup.end_all().await;
    }
}

/// A local wall-clock time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyAt {
    hour: u32,
    minute: u32,
}

impl DailyAt {
    /// # Errors
    /// [`ScheduleError::InvalidTime`] for hour ≥ 24 or minute ≥ 60.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        if hour >= 24 || minute >= 60 {
            return Err(ScheduleError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Next occurrence strictly after `now`, in the local time zone.
    pub fn next_after(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        let local = now.with_timezone(&Local);
        future_time(&local, self.hour, self.minute).map(|t| t.with_timezone(&Utc))
    }
}

/// The background loop of a [`ScheduledTask`].
struct ScheduleLoop<C> {
    id: u64,
    action: Action<C>,
    lights: LightSet,
    times: Option<DailyAt>,
    high_priority: bool,
    executor: Executor<C>,
}

impl<C: Send + Sync + 'static> ScheduleLoop<C> {
    async fn fire(&self) -> Option<Execution> {
        let action = self.action.clone();
        if self.high_priority {
            self.executor.preempt(action, &self.lights).await
        } else {
            self.executor.maybe_start(action, &self.lights).await
        }
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> Task for ScheduleLoop<C> {
    fn task_id(&self) -> String {
        format!("scheduled:{}", self.id)
    }

    fn conflicts_with(&self, _other: &Self) -> bool {
        true
    }

    async fn run(&self, exec: &Execution) -> Result<(), TaskError> {
        let Some(times) = self.times else {
            self.fire().await;
            return Ok(());
        };
        loop {
            let now = exec.now();
            let next = times.next_after(now).map_err(TaskError::fail)?;
            let delay = (next - now).to_std().unwrap_or_default();
            if !exec.sleep(delay).await {
                return Ok(());
            }
            let started = self.fire().await;
            tracing::debug!(
                schedule = self.id,
                started = started.is_some(),
                "schedule fired"
            );
        }
    }
}

/// A standing rule that starts an action on an executor, once or daily.
pub struct ScheduledTask<C> {
    id: u64,
    description: String,
    runner: BackgroundRunner<ScheduleLoop<C>>,
}

impl<C: Send + Sync + 'static> ScheduledTask<C> {
    /// Creates a disabled rule.
    ///
    /// - `times = None` fires once when enabled
    /// - `high_priority = true` ends overlapping actions first ([`Executor::preempt`]),
    ///   otherwise only free lights are used ([`Executor::maybe_start`])
    pub fn new(
        id: u64,
        description: impl Into<String>,
        action: Action<C>,
        lights: LightSet,
        times: Option<DailyAt>,
        high_priority: bool,
        executor: Executor<C>,
    ) -> Self {
        let sup = Supervisor::new(executor.supervisor().clock());
        let task = ScheduleLoop {
            id,
            action,
            lights,
            times,
            high_priority,
            executor,
        };
        Self {
            id,
            description: description.into(),
            runner: BackgroundRunner::new(task, sup),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Requested lights.
    pub fn lights(&self) -> &LightSet {
        &self.runner.task().lights
    }

    pub fn times(&self) -> Option<DailyAt> {
        self.runner.task().times
    }

    pub fn high_priority(&self) -> bool {
        self.runner.task().high_priority
    }

    pub async fn is_enabled(&self) -> bool {
        self.runner.is_enabled().await
    }

    pub async fn enable(&self) {
        self.runner.enable().await;
    }

    pub async fn disable(&self) {
        self.runner.disable().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn daily_at_validates() {
        assert!(DailyAt::new(23, 59).is_ok());
        assert_eq!(
            DailyAt::new(24, 0),
            Err(ScheduleError::InvalidTime { hour: 24, minute: 0 })
        );
        assert!(DailyAt::new(6, 60).is_err());
    }

    #[test]
    fn next_after_is_within_a_day() {
        let at = DailyAt::new(6, 45).unwrap();
        let now = Utc.with_ymd_and_hms(2014, 11, 7, 16, 43, 0).unwrap();
        let next = at.next_after(now).unwrap();
        assert!(next > now);
        assert!(next - now <= chrono::TimeDelta::hours(25));
    }
}
