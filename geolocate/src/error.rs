//! Public error taxonomy.
//!
//! Every failure path in the crate maps to exactly one [`ErrorKind`] plus a
//! `retryable` flag on the [`ResolutionResult`](crate::controller::ResolutionResult).
//! Callers decide between "try again" and manual input from the kind alone,
//! without inspecting message text.

use serde::{Deserialize, Serialize};

/// Closed set of failure classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The user or platform refused location access.
    PermissionDenied,
    /// The location source could not produce a position right now.
    SourceUnavailable,
    /// No position arrived before the timeout, or retries were exhausted.
    TimedOut,
    /// Transport-level failure talking to a remote service.
    NetworkFailure,
    /// Latitude/longitude was non-finite or out of range.
    InvalidCoordinate,
    /// Every geocoding provider failed to name the position.
    GeocodingFailed,
    /// No location capability is present on this device.
    Unsupported,
    /// An acquisition was attempted too soon after the previous one.
    RateLimited,
}

impl ErrorKind {
    /// Whether a failure of this kind is worth retrying by default.
    ///
    /// The controller may override this for specific paths; retry
    /// exhaustion reports [`ErrorKind::TimedOut`] as not retryable.
    pub fn default_retryable(&self) -> bool {
        match self {
            Self::SourceUnavailable
            | Self::TimedOut
            | Self::NetworkFailure
            | Self::GeocodingFailed
            | Self::RateLimited => true,
            Self::PermissionDenied | Self::InvalidCoordinate | Self::Unsupported => false,
        }
    }

    /// Short, actionable text suitable for showing to a user.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access was denied. Enable it in settings or enter your city manually."
            }
            Self::SourceUnavailable => "Your location is unavailable right now. Please try again.",
            Self::TimedOut => "Finding your location took too long. Please try again.",
            Self::NetworkFailure => "A network error occurred. Check your connection.",
            Self::InvalidCoordinate => {
                "Your device reported an invalid position. Enter your city manually."
            }
            Self::GeocodingFailed => "We found your position but could not determine your city.",
            Self::Unsupported => {
                "Location services are not supported on this device. Enter your city manually."
            }
            Self::RateLimited => "Please wait a moment before trying again.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PermissionDenied => "permission denied",
            Self::SourceUnavailable => "source unavailable",
            Self::TimedOut => "timed out",
            Self::NetworkFailure => "network failure",
            Self::InvalidCoordinate => "invalid coordinate",
            Self::GeocodingFailed => "geocoding failed",
            Self::Unsupported => "unsupported",
            Self::RateLimited => "rate limited",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds_are_not_retryable() {
        assert!(!ErrorKind::PermissionDenied.default_retryable());
        assert!(!ErrorKind::Unsupported.default_retryable());
        assert!(!ErrorKind::InvalidCoordinate.default_retryable());
    }

    #[test]
    fn test_transient_kinds_are_retryable() {
        assert!(ErrorKind::SourceUnavailable.default_retryable());
        assert!(ErrorKind::TimedOut.default_retryable());
        assert!(ErrorKind::RateLimited.default_retryable());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidCoordinate).unwrap();
        assert_eq!(json, "\"invalidCoordinate\"");
    }
}
