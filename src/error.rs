//! Error types used by the light-set algebra, actions and schedulers.
//!
//! This module defines three error enums:
//!
//! - [`LightsError`]: malformed light-set text and invalid set operations.
//! - [`TaskError`]: errors raised by individual action executions.
//! - [`ScheduleError`]: invalid wall-clock trigger times.
//!
//! All types provide `as_label` for logging.
//! The control-loop error of the override coordinator is [`StackError`](crate::StackError).

use std::fmt;

use thiserror::Error;

/// # Errors produced by [`LightSet`](crate::LightSet) parsing and operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightsError {
    /// A comma-separated token is not an integer.
    #[error("invalid light id {token:?}")]
    InvalidId {
        /// The offending token, trimmed.
        token: String,
    },

    /// A token parsed as an integer but is zero or negative.
    #[error("light ids must be positive, got {token:?}")]
    NonPositive {
        /// The offending token, trimmed.
        token: String,
    },

    /// Subtraction with the universal set on the left has no finite answer.
    #[error("cannot subtract from the set of all lights")]
    SubtractFromAll,

    /// In-place union involving the universal set on either side.
    #[error("cannot merge the set of all lights in place")]
    MergeAll,
}

impl LightsError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use lightvisor::LightsError;
    ///
    /// assert_eq!(LightsError::SubtractFromAll.as_label(), "lights_subtract_from_all");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LightsError::InvalidId { .. } => "lights_invalid_id",
            LightsError::NonPositive { .. } => "lights_non_positive",
            LightsError::SubtractFromAll => "lights_subtract_from_all",
            LightsError::MergeAll => "lights_merge_all",
        }
    }
}

/// # Errors produced by action execution.
///
/// An execution error never reaches the caller that admitted the action: it is
/// stored in the [`Execution`](crate::Execution) error slot and reported to
/// subscribers.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The action failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The action observed cancellation and gave up.
    #[error("execution cancelled")]
    Canceled,
}

impl TaskError {
    /// Wraps any displayable error as [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use lightvisor::TaskError;
    ///
    /// let err = TaskError::fail("bridge unreachable");
    /// assert_eq!(err.to_string(), "execution failed: bridge unreachable");
    /// ```
    pub fn fail(error: impl fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

/// # Errors produced when computing wall-clock trigger times.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// Hour must be in `0..24` and minute in `0..60`.
    #[error("invalid time of day {hour}:{minute:02}")]
    InvalidTime {
        /// Requested hour.
        hour: u32,
        /// Requested minute.
        minute: u32,
    },

    /// No representable local time follows `now` (calendar overflow).
    #[error("no upcoming occurrence of {hour}:{minute:02}")]
    OutOfRange {
        /// Requested hour.
        hour: u32,
        /// Requested minute.
        minute: u32,
    },
}

impl ScheduleError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ScheduleError::InvalidTime { .. } => "schedule_invalid_time",
            ScheduleError::OutOfRange { .. } => "schedule_out_of_range",
        }
    }
}
