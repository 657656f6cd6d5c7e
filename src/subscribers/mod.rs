//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and, with the `logging` feature, the built-in [`LogWriter`](embedded::LogWriter).
//!
//! ## Architecture
//! ```text
//! BoundTask::run ─┐
//!                 ├── emit(Event) ──► SubscriberSet ──► [queue] ──► Subscribe::on_event
//! Stack loop ─────┘                                  ├─► [queue] ──► LogWriter
//!                                                    └─► [queue] ──► custom ...
//! ```

pub mod embedded;
mod subscribe;
mod subscriber_set;

pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
