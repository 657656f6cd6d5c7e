//! Runtime core: execution handles, task bookkeeping and supervision.
//!
//! Everything here is generic over [`Task`](crate::Task); nothing knows about lights.
//!
//! Internal modules:
//! - [`clock`]: wall-clock source, real or fake;
//! - [`execution`]: cancellable handle shared by a task and its caller;
//! - [`registry`]: ordered list of active tasks with conflict queries;
//! - [`runner`]: runs one task and records its failure;
//! - [`supervisor`]: starts tasks, pauses, stops and closes.

mod clock;
mod execution;
mod registry;
mod runner;
mod supervisor;

pub use clock::{Clock, FakeClock, SystemClock};
pub use execution::Execution;
pub use registry::Registry;
pub use supervisor::Supervisor;

pub(crate) use runner::panic_message;
