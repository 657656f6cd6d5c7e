//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. the `filter` argument (if provided)
//! 2. `LIGHTVISOR_LOG` environment variable (e.g. "info", "lightvisor=debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR.

use std::error::Error;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Environment variable consulted when no filter is passed.
pub const LOG_ENV: &str = "LIGHTVISOR_LOG";

/// Initialise the global logging subscriber.
///
/// Fails if `filter` is not a valid filter directive or a global subscriber
/// is already installed. A malformed `LIGHTVISOR_LOG` falls back to `info`.
pub fn init_logging(filter: Option<&str>) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter)?)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
}

fn env_filter(filter: Option<&str>) -> Result<EnvFilter, ParseError> {
    match filter {
        Some(directives) => EnvFilter::try_new(directives),
        None => Ok(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}
