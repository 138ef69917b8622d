//! Core types for the location cache.

use tokio::time::Instant;

use crate::coord::Coordinate;
use crate::provider::PlaceName;

/// Key under which the current user's resolved location is stored.
pub const CURRENT_LOCATION_KEY: &str = "current";

/// A previously resolved coordinate/place pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub coordinate: Coordinate,
    /// Absent when geocoding failed for this coordinate.
    pub place: Option<PlaceName>,
    pub stored_at: Instant,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(coordinate: Coordinate, place: Option<PlaceName>) -> Self {
        Self::stored_at(coordinate, place, Instant::now())
    }

    /// Create an entry with an explicit storage time.
    pub fn stored_at(coordinate: Coordinate, place: Option<PlaceName>, stored_at: Instant) -> Self {
        Self {
            coordinate,
            place,
            stored_at,
        }
    }

    /// Age of the entry relative to `now`.
    pub fn age(&self, now: Instant) -> std::time::Duration {
        now.saturating_duration_since(self.stored_at)
    }
}
