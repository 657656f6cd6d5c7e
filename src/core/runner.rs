//! # Run a single task to completion.
//!
//! ## Outcome flow
//! ```text
//! task.run(exec) → Ok(())          → nothing recorded
//!                → Err(Canceled)   → nothing recorded (graceful stop)
//!                → Err(Fail)       → exec.set_error(e)
//!                → panic           → exec.set_error(Fail{"panicked: .."})
//! ```
//!
//! ## Rules
//! - A panicking task never takes the supervisor down with it.
//! - The error slot is the only place an execution error lands.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::core::Execution;
use crate::error::TaskError;
use crate::tasks::Task;

/// Runs `task` once against `exec` and records its failure, if any.
pub(crate) async fn run_once<T: Task>(task: &T, exec: &Execution) {
    let res = match AssertUnwindSafe(task.run(exec)).catch_unwind().await {
        Ok(res) => res,
        Err(panic) => Err(TaskError::fail(format!(
            "panicked: {}",
            panic_message(panic.as_ref())
        ))),
    };

    match res {
        Ok(()) | Err(TaskError::Canceled) => {}
        Err(e) => {
            tracing::debug!(task = %task.task_id(), error = %e, "task returned an error");
            exec.set_error(e);
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
