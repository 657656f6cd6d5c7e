//! # Light controllers.
//!
//! Everything that decides which action drives which light, and when:
//! - [`Executor`]: starts actions on lights, opportunistically or by preemption;
//! - [`Timer`]: starts actions on an executor at a given time;
//! - [`ScheduledTask`]: standing daily (or one-shot) rules on top of an executor;
//! - [`Stack`]: hands every light to an override executor and back.

pub mod admission;

mod builder;
mod error;
mod executor;
mod schedule;
mod snapshot;
mod stack;
mod timer;
mod view;

pub use admission::{Admission, DeclineReason, admit};
pub use builder::ExecutorBuilder;
pub use error::StackError;
pub use executor::Executor;
pub use schedule::{BackgroundRunner, DailyAt, ScheduledTask};
pub use snapshot::Snapshot;
pub use stack::Stack;
pub use timer::Timer;
pub use view::{ActionView, ScheduledView};
