//! Display rows for listing running and scheduled actions.

use chrono::{DateTime, Utc};

use crate::tasks::{BoundTask, Task, TimedTask};

/// A running action as a listing shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionView {
    /// `<action id>:<lights>`, accepted by [`Executor::stop`](crate::Executor::stop).
    pub task_id: String,
    pub action_id: u64,
    pub description: String,
    pub lights: String,
}

impl<C: Send + Sync + 'static> From<&BoundTask<C>> for ActionView {
    fn from(t: &BoundTask<C>) -> Self {
        Self {
            task_id: t.task_id(),
            action_id: t.action().id(),
            description: t.action().description().to_string(),
            lights: t.lights().to_string(),
        }
    }
}

/// A pending timed action as a listing shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledView {
    /// `<action id>:<unix seconds>:<lights>`, accepted by [`Timer::cancel`](crate::Timer::cancel).
    pub task_id: String,
    pub action_id: u64,
    pub description: String,
    pub lights: String,
    pub start_time: DateTime<Utc>,
    /// Countdown as `H:MM:SS` or `M:SS`.
    pub time_left: String,
}

impl ScheduledView {
    pub fn new<C: Send + Sync + 'static>(t: &TimedTask<C>, now: DateTime<Utc>) -> Self {
        Self {
            task_id: t.task_id(),
            action_id: t.action().id(),
            description: t.action().description().to_string(),
            lights: t.lights().to_string(),
            start_time: t.start_time(),
            time_left: t.time_left_str(now),
        }
    }
}
