//! Device location capability.
//!
//! The platform's location service is an external collaborator. It is
//! modelled as the [`LocationSource`] trait: one call that yields a
//! [`Coordinate`] or one of three standard failures.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::coord::Coordinate;
use crate::error::ErrorKind;

/// Parameters for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    /// How long the source may take before giving up.
    pub timeout: Duration,
    /// Ask for the best accuracy the hardware can provide.
    pub high_accuracy: bool,
}

/// Failures reported by a location source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The user or platform refused location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The source could not determine a position.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// The source gave up before producing a position.
    #[error("Location source timed out")]
    Timeout,
}

impl SourceError {
    /// Classification for the public error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::PositionUnavailable(_) => ErrorKind::SourceUnavailable,
            Self::Timeout => ErrorKind::TimedOut,
        }
    }

    /// Whether the same request could plausibly succeed later.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::PermissionDenied)
    }
}

/// On-device location capability.
///
/// Implementations wrap whatever the host platform provides. The controller
/// races [`current_position`](LocationSource::current_position) against its
/// own timer, so implementations need not enforce `request.timeout` exactly;
/// a late answer is dropped.
pub trait LocationSource: Send + Sync {
    /// Whether the capability exists at all on this device.
    fn is_available(&self) -> bool;

    /// Request the current position.
    fn current_position(
        &self,
        request: PositionRequest,
    ) -> impl Future<Output = Result<Coordinate, SourceError>> + Send;
}
