#![forbid(unsafe_code)]

//! Diagnostic logging setup for the binary.
//!
//! Library code only emits `tracing` events and spans. This module installs
//! the process-wide subscriber: human-readable or JSON lines on stderr,
//! filtered by `SENTISCOPE_LOG` (an `EnvFilter` directive string).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "SENTISCOPE_LOG";

/// Directive used when `SENTISCOPE_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Emit one JSON object per event instead of text.
    pub json: bool,
    /// Directives overriding `SENTISCOPE_LOG`.
    pub directives: Option<String>,
}

/// Build the event filter, preferring explicit directives, then the
/// environment, then [`DEFAULT_DIRECTIVE`].
#[must_use]
pub fn filter(directives: Option<&str>) -> EnvFilter {
    let from_env = std::env::var(LOG_ENV).ok();
    let chosen = directives.or(from_env.as_deref());
    match chosen.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        Some(Err(_)) | None => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

/// Install the global subscriber.
///
/// Returns `false` without touching anything if a global subscriber is
/// already set (for example by a test harness).
pub fn init(options: &LogOptions) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(options.directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if options.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if installed {
        tracing::debug!(json = options.json, "logging initialized");
    }
    installed
}
