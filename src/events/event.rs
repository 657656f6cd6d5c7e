//! # Events emitted by actions and the override coordinator.
//!
//! The [`EventKind`] enum classifies event types in two groups:
//! - **Action lifecycle**: a bound action starting and how it ended
//! - **Override coordinator**: snapshot or restore failures that were logged and skipped
//!
//! The [`Event`] struct carries the metadata: timestamp, task identity,
//! description, light set and reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use lightvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionFailed)
//!     .with_task("21:5,7")
//!     .with_lights("5,7")
//!     .with_reason("bridge unreachable");
//!
//! assert_eq!(ev.kind, EventKind::ActionFailed);
//! assert_eq!(ev.task.as_deref(), Some("21:5,7"));
//! assert_eq!(ev.reason.as_deref(), Some("bridge unreachable"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Action lifecycle ===
    /// A bound action is about to run.
    ///
    /// Sets:
    /// - `task`: task identity (`<action id>:<lights>`)
    /// - `description`: action description
    /// - `lights`: lights the action drives
    ActionStarting,

    /// The action returned on its own, without error.
    ///
    /// Sets: `task`, `description`, `lights`
    ActionFinished,

    /// The action returned after its execution was ended.
    ///
    /// Sets: `task`, `description`, `lights`
    ActionInterrupted,

    /// The action recorded an error.
    ///
    /// Sets:
    /// - `task`, `description`, `lights`
    /// - `reason`: error message
    ActionFailed,

    // === Override coordinator ===
    /// Taking the snapshot during a push failed; the matching pop will not restore.
    ///
    /// Sets:
    /// - `lights`: lights that were to be captured
    /// - `reason`: error message
    SnapshotFailed,

    /// Running the restore action during a pop failed.
    ///
    /// Sets:
    /// - `lights`: lights that were to be restored
    /// - `reason`: error message
    RestoreFailed,
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::ActionStarting => "action_starting",
            EventKind::ActionFinished => "action_finished",
            EventKind::ActionInterrupted => "action_interrupted",
            EventKind::ActionFailed => "action_failed",
            EventKind::SnapshotFailed => "snapshot_failed",
            EventKind::RestoreFailed => "restore_failed",
        }
    }
}

/// Event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task identity, if applicable.
    pub task: Option<Arc<str>>,
    /// Action description, if applicable.
    pub description: Option<Arc<str>>,
    /// Rendered light set, if applicable.
    pub lights: Option<Arc<str>>,
    /// Human-readable reason (errors).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            description: None,
            lights: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    #[inline]
    pub fn with_description(mut self, description: impl Into<Arc<str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    pub fn with_lights(mut self, lights: impl Into<Arc<str>>) -> Self {
        self.lights = Some(lights.into());
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
