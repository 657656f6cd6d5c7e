//! # Runtime configuration.
//!
//! Provides [`Config`], the settings of the override coordinator.
//!
//! ## Sentinel values
//! - `settle_delay = 0s` → snapshot immediately after pausing the base layer
//! - `stack_queue_capacity = 0` → clamped to 1

use std::time::Duration;

/// Global configuration for the coordinators.
///
/// ## Field semantics
/// - `settle_delay`: how long the [`Stack`](crate::Stack) waits after pausing
///   the base layer before it snapshots the lights, so fades in progress can land
/// - `stack_queue_capacity`: pending push/pop requests buffered in front of the control loop
///
/// All fields are public. Prefer the helper accessors over repeating sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Pause between stopping base-layer actions and taking the snapshot.
    pub settle_delay: Duration,

    /// Capacity of the push/pop request channel (min 1).
    pub stack_queue_capacity: usize,
}

impl Config {
    /// Returns the stack request queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn stack_queue_capacity_clamped(&self) -> usize {
        self.stack_queue_capacity.max(1)
    }

    /// Returns the settle delay as an `Option`; `None` means do not wait.
    #[inline]
    pub fn settle(&self) -> Option<Duration> {
        if self.settle_delay.is_zero() {
            None
        } else {
            Some(self.settle_delay)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `settle_delay = 500ms` (longer than a typical light transition)
    /// - `stack_queue_capacity = 16`
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            stack_queue_capacity: 16,
        }
    }
}
