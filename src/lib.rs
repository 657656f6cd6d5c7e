//! # lightvisor
//!
//! **Lightvisor** arbitrates a shared bank of lights between concurrent,
//! long-running actions (fades, wake-up sequences, candle flicker ...).
//!
//! It decides which action drives which light, starts actions now, later or
//! every day, and lets an operator take over every light temporarily and hand
//! it back in the state it was found.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌─────────────┐   ┌─────────────┐   ┌──────────────────┐
//!   │   Action    │   │    Timer    │   │  ScheduledTask   │
//!   │ (id, desc,  │   │ (start at   │   │ (daily hh:mm,    │
//!   │ LightAction)│   │   a time)   │   │  high/low prio)  │
//!   └──────┬──────┘   └──────┬──────┘   └────────┬─────────┘
//!          │ start / maybe_start / preempt       │
//!          ▼                 ▼                   ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Executor                                                 │
//! │  - admission (which free lights an action may take)       │
//! │  - Supervisor<BoundTask> (spawn, pause, stop, close)      │
//! │  - Registry (running actions in start order)              │
//! │  - SubscriberSet (optional event fan-out)                 │
//! └──────┬───────────────────┬───────────────────┬────────────┘
//!        ▼                   ▼                   ▼
//!   ┌───────────┐       ┌───────────┐       ┌───────────┐
//!   │ BoundTask │       │ BoundTask │       │ BoundTask │
//!   │ 21 on 5,7 │       │ 25 on 2   │       │ 31 on 3,4 │
//!   └─────┬─────┘       └─────┬─────┘       └─────┬─────┘
//!         │ ActionStarting / Finished / Interrupted / Failed
//!         ▼                   ▼                   ▼
//!   ┌───────────────────────────────────────────────────────┐
//!   │          SubscriberSet ──► LogWriter, custom ...      │
//!   └───────────────────────────────────────────────────────┘
//!
//!   Stack: base Executor ◄──push/pop──► extra Executor
//!          push = pause base, snapshot lights, resume extra
//!          pop  = pause extra, restore snapshot, resume base
//! ```
//!
//! ### Lifecycle of one action
//! ```text
//! Executor::maybe_start(action, lights)
//!   ├─► admit(action, lights, running lights) ── Decline ─► None
//!   └─► Start(granted)
//!         └─► Supervisor::start(BoundTask{action, granted})
//!               ├─ registry.add
//!               ├─ spawn: action.execute(ctx, granted, exec)
//!               │         (panics are caught and recorded as failures)
//!               ├─ registry.remove
//!               └─ exec.finish() ─► Execution::done() resolves
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------|-------------------------------------------|
//! | **Light sets**    | Value algebra over light ids with "all" and "none".       | [`LightSet`]                              |
//! | **Actions**       | Things that drive lights, as traits or closures.          | [`LightAction`], [`Action`], [`ActionFn`] |
//! | **Execution**     | Start, admit, preempt, stop, pause, close.                | [`Executor`], [`Execution`]               |
//! | **Scheduling**    | One-off timers and standing daily rules.                  | [`Timer`], [`ScheduledTask`]              |
//! | **Override**      | Snapshot, hand over and restore every light.              | [`Stack`], [`Snapshot`]                   |
//! | **Subscriber API**| Hook into action lifecycle events.                        | [`Subscribe`], [`Event`]                  |
//! | **Errors**        | Typed errors for parsing, actions and scheduling.         | [`LightsError`], [`TaskError`]            |
//! | **Configuration** | Settle delay and queue sizes of the override loop.        | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports the built-in [`LogWriter`] and `init_logging`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use lightvisor::{Action, ActionFn, Execution, Executor, LightSet, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = Executor::new(());
//!
//!     let glow: Action<()> = ActionFn::action(21, "Glow", |_lights: LightSet, exec: Execution| {
//!         async move {
//!             exec.sleep(Duration::from_secs(60)).await;
//!             Ok::<_, TaskError>(())
//!         }
//!     });
//!
//!     let lights: LightSet = "1,2".parse()?;
//!     executor.maybe_start(glow.clone(), &lights).await;
//!
//!     // Lights 1 and 2 are taken, so only 3 is granted.
//!     let exec = executor.maybe_start(glow, &"2,3".parse()?).await;
//!     assert!(exec.is_some());
//!
//!     let views = executor.views().await;
//!     let running: Vec<&str> = views.iter().map(|v| v.lights.as_str()).collect();
//!     assert_eq!(running, ["1,2", "3"]);
//!
//!     executor.close().await;
//!     Ok(())
//! }
//! ```

mod config;
mod controller;
mod core;
mod error;
mod events;
mod lights;
mod subscribers;
mod tasks;

pub mod time;

#[cfg(feature = "logging")]
mod logging;

// ---- Public re-exports ----

pub use config::Config;
pub use controller::{
    ActionView, Admission, BackgroundRunner, DailyAt, DeclineReason, Executor, ExecutorBuilder,
    ScheduledTask, ScheduledView, Snapshot, Stack, StackError, Timer, admit,
};
pub use core::{Clock, Execution, FakeClock, Registry, Supervisor, SystemClock};
pub use error::{LightsError, ScheduleError, TaskError};
pub use events::{Event, EventKind};
pub use lights::LightSet;
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{Action, ActionFn, ActionRef, BoundTask, LightAction, Task, TimedTask};

// Optional: built-in logger subscriber and subscriber installation.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use logging::{LOG_ENV, init_logging};
#[cfg(feature = "logging")]
pub use subscribers::embedded::LogWriter;
