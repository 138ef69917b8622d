//! Console logging setup for embedding applications.
//!
//! The library itself only emits `tracing` events. Applications that have no
//! subscriber of their own can call [`init_logging`] once at startup to get
//! human-readable output on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor the caller supply one.
pub const DEFAULT_LOG_DIRECTIVE: &str = "geolocate=info";

/// Errors from logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Install a global console subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Fails if another
/// subscriber has already been set; nothing is written to disk.
pub fn init_logging(default_directive: &str) -> Result<(), LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), default_directive)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

/// Pick the filter directive, preferring a non-empty environment value.
fn build_filter(env: Option<&str>, default_directive: &str) -> Result<EnvFilter, LoggingError> {
    let directive = match env {
        Some(value) if !value.trim().is_empty() => value,
        _ => default_directive,
    };

    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidDirective {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}
