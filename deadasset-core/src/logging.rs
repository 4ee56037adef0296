//! Structured logging using **tracing**.
//!
//! All diagnostics go to stderr so stdout stays reserved for the report.
//! Per-file read failures are emitted at WARN, which is also the default
//! level when `RUST_LOG` is unset.

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the global tracing subscriber.
///
/// Call *once* at startup. With `json` set, events are written as JSON lines
/// (level, target, span context); otherwise a compact human-readable format.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=deadasset_core=debug`)
pub fn init_structured_logging(json: bool) {
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_level(true)
            .with_target(true)
            .with_current_span(true)
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}
