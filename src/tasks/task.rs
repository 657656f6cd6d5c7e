//! # Supervised task abstraction.
//!
//! [`Task`] is what a [`Supervisor`](crate::Supervisor) runs and its
//! [`Registry`](crate::Registry) tracks: a unit of work with a stable
//! identity and a conflict predicate against tasks of the same kind.

use async_trait::async_trait;

use crate::core::Execution;
use crate::error::TaskError;

/// # Asynchronous, cancellable unit with an identity.
///
/// Implementors should watch [`Execution::is_ended`] (or sleep through
/// [`Execution::sleep`]) and return promptly once ended.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use lightvisor::{Execution, Task, TaskError};
///
/// struct Blink(u32);
///
/// #[async_trait]
/// impl Task for Blink {
///     fn task_id(&self) -> String { format!("blink:{}", self.0) }
///
///     fn conflicts_with(&self, other: &Self) -> bool { self.0 == other.0 }
///
///     async fn run(&self, exec: &Execution) -> Result<(), TaskError> {
///         while exec.sleep(std::time::Duration::from_millis(500)).await {
///             // toggle light self.0 ...
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Textual identity; need not be unique.
    fn task_id(&self) -> String;

    /// Returns true if `self` and `other` must not run at the same time.
    fn conflicts_with(&self, other: &Self) -> bool;

    /// Runs the task until it finishes or the execution is ended.
    ///
    /// A returned error is stored in the execution's error slot. Returning
    /// [`TaskError::Canceled`] is treated as a graceful stop.
    async fn run(&self, exec: &Execution) -> Result<(), TaskError>;
}
