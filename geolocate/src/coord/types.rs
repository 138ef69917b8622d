//! Coordinate type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A position reading from a location source.
///
/// Immutable once produced. Use [`Coordinate::new`] to build one from
/// untrusted input; the checked constructor enforces the same bounds as
/// [`super::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, if the source reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// When the source captured this reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl Coordinate {
    /// Creates a validated coordinate with no accuracy or timestamp metadata.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }

        Ok(Self::unchecked(latitude, longitude))
    }

    /// Creates a coordinate without bounds checking.
    ///
    /// Location sources report whatever the hardware produced; the
    /// controller re-validates before use.
    pub fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            captured_at: None,
        }
    }

    /// Attaches an accuracy radius in meters.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    /// Attaches a capture timestamp.
    pub fn with_captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }

    /// Returns true if both components are finite and within bounds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        super::validate(self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Errors from coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is NaN, infinite, or outside -90..=90
    #[error(
        "Invalid latitude: {0} (must be between {min} and {max})",
        min = MIN_LAT,
        max = MAX_LAT
    )]
    InvalidLatitude(f64),
    /// Longitude is NaN, infinite, or outside -180..=180
    #[error(
        "Invalid longitude: {0} (must be between {min} and {max})",
        min = MIN_LON,
        max = MAX_LON
    )]
    InvalidLongitude(f64),
}

impl CoordError {
    /// Classification for the public error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidCoordinate
    }
}
