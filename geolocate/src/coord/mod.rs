//! Coordinate types and validation
//!
//! Every coordinate that enters the resolution pipeline passes through
//! [`validate`]: once when the location source reports it, and again before
//! any geocoding provider is contacted.

mod types;

pub use types::{Coordinate, CoordError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Checks latitude/longitude bounds.
///
/// Returns `false` for NaN, infinities, and anything outside
/// `-90..=90` / `-180..=180`. Bounds are inclusive.
#[inline]
pub fn validate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (MIN_LAT..=MAX_LAT).contains(&latitude)
        && (MIN_LON..=MAX_LON).contains(&longitude)
}
