//! # LogWriter: action journal through `tracing`
//!
//! A subscriber that turns [`Event`]s into one log line each, in the shape
//! operators grep for.
//!
//! ## Example output
//! ```text
//! INFO  START: {21, Wake up, 5,7}
//! INFO  FINISH: {21, Wake up, 5,7}
//! INFO  INTERRUPTED: {25, Candle, 2}
//! ERROR ERROR: {31, Sunset, 3,4}: execution failed: bridge unreachable
//! ERROR ERROR: snapshot of All: execution failed: timeout
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `{id, description, lights}` the way task listings show it.
fn subject(e: &Event) -> String {
    let id = e
        .task
        .as_deref()
        .and_then(|t| t.split(':').next())
        .unwrap_or("?");
    format!(
        "{{{}, {}, {}}}",
        id,
        e.description.as_deref().unwrap_or(""),
        e.lights.as_deref().unwrap_or("?")
    )
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let reason = e.reason.as_deref().unwrap_or("unknown");
        let lights = e.lights.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::ActionStarting => tracing::info!("START: {}", subject(e)),
            EventKind::ActionFinished => tracing::info!("FINISH: {}", subject(e)),
            EventKind::ActionInterrupted => tracing::info!("INTERRUPTED: {}", subject(e)),
            EventKind::ActionFailed => tracing::error!("ERROR: {}: {reason}", subject(e)),
            EventKind::SnapshotFailed => tracing::error!("ERROR: snapshot of {lights}: {reason}"),
            EventKind::RestoreFailed => tracing::error!("ERROR: restore of {lights}: {reason}"),
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_matches_listing_shape() {
        let ev = Event::new(EventKind::ActionStarting)
            .with_task("21:5,7")
            .with_description("Wake up")
            .with_lights("5,7");
        assert_eq!(subject(&ev), "{21, Wake up, 5,7}");
    }
}
