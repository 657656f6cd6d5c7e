//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - what supervisors run and registries track
//! - [`LightAction`] / [`Action`] - the light-driving capability and its identity
//! - [`ActionFn`] - closure-backed action
//! - [`BoundTask`] - an action bound to its lights (runs on an executor)
//! - [`TimedTask`] - an action waiting for its start time (runs on a timer)

mod action;
mod action_fn;
mod bound;
mod task;
mod timed;

pub use action::{Action, ActionRef, LightAction};
pub use action_fn::ActionFn;
pub use bound::BoundTask;
pub use task::Task;
pub use timed::TimedTask;
