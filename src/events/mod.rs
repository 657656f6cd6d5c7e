//! Events describing what actions and coordinators did.
//!
//! Events are fanned out to [`Subscribe`](crate::Subscribe) implementations
//! through a [`SubscriberSet`](crate::SubscriberSet).

mod event;

pub use event::{Event, EventKind};
