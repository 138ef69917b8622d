//! Request options, progress stages and the public result type.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::error::ErrorKind;
use crate::provider::PlaceName;

/// How much location detail the caller wants to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyMode {
    /// Coordinates are enough; a place name is a bonus.
    #[default]
    Precise,
    /// Only the city is shared, so a place name is required.
    CityOnly,
}

/// Options for a single acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquireOptions {
    /// Skip the cache and always ask the location source.
    pub force_refresh: bool,
    pub privacy_mode: PrivacyMode,
}

impl AcquireOptions {
    pub fn precise() -> Self {
        Self::default()
    }

    pub fn city_only() -> Self {
        Self {
            privacy_mode: PrivacyMode::CityOnly,
            ..Self::default()
        }
    }

    pub fn force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// Named progress points reported during an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcquisitionStage {
    Permission,
    Acquiring,
    Acquired,
    Geocoding,
    Complete,
}

impl AcquisitionStage {
    /// Progress percentage associated with this stage.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Permission => 10,
            Self::Acquiring => 30,
            Self::Acquired => 60,
            Self::Geocoding => 80,
            Self::Complete => 100,
        }
    }
}

impl std::fmt::Display for AcquisitionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Permission => "permission",
            Self::Acquiring => "acquiring",
            Self::Acquired => "acquired",
            Self::Geocoding => "geocoding",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Caller-supplied progress sink.
///
/// Invoked synchronously at each stage transition. It has no influence on
/// control flow.
pub type ProgressFn<'a> = &'a (dyn Fn(AcquisitionStage, u8) + Send + Sync);

/// Where a successful result's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    /// Straight from the location source, without a place name.
    Device,
    /// Location source plus a place name from a geocoding provider.
    NetworkProvider,
    /// Served from the location cache.
    Cache,
}

/// What happened to the place name for this result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PlaceStatus {
    /// A provider named the position.
    Resolved,
    /// Geocoding was attempted and every provider failed.
    Unresolved { reason: String },
    /// No geocoding happened for this result.
    NotAttempted,
}

/// Outcome of an acquisition.
///
/// `succeeded` implies `coordinate` is present; a failure always carries an
/// `error_kind`. A success may also carry `error_kind` when the caller asked
/// for [`PrivacyMode::CityOnly`] and no place name could be found; see
/// [`is_partial`](Self::is_partial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub succeeded: bool,
    pub coordinate: Option<Coordinate>,
    pub place: Option<PlaceName>,
    pub place_status: PlaceStatus,
    pub error_message: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub retryable: bool,
    pub origin: Origin,
}

impl ResolutionResult {
    /// A failed acquisition.
    pub fn failure(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            succeeded: false,
            coordinate: None,
            place: None,
            place_status: PlaceStatus::NotAttempted,
            error_message: Some(message.into()),
            error_kind: Some(kind),
            retryable,
            origin: Origin::Device,
        }
    }

    /// A successful acquisition.
    pub fn located(
        coordinate: Coordinate,
        place: Option<PlaceName>,
        place_status: PlaceStatus,
        origin: Origin,
    ) -> Self {
        Self {
            succeeded: true,
            coordinate: Some(coordinate),
            place,
            place_status,
            error_message: None,
            error_kind: None,
            retryable: false,
            origin,
        }
    }

    /// Marks a success as missing a place name the caller required.
    pub(crate) fn missing_required_place(mut self, reason: &str) -> Self {
        self.error_kind = Some(ErrorKind::GeocodingFailed);
        self.error_message = Some(format!("City name required but unavailable: {}", reason));
        self.retryable = true;
        self
    }

    /// True for a coordinate-only success where a place name was required.
    pub fn is_partial(&self) -> bool {
        self.succeeded && self.error_kind.is_some()
    }

    /// City name, if one was resolved.
    pub fn city(&self) -> Option<&str> {
        self.place.as_ref().and_then(|p| p.city.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progress_is_monotonic() {
        let stages = [
            AcquisitionStage::Permission,
            AcquisitionStage::Acquiring,
            AcquisitionStage::Acquired,
            AcquisitionStage::Geocoding,
            AcquisitionStage::Complete,
        ];
        assert!(stages.windows(2).all(|w| w[0].progress() < w[1].progress()));
        assert_eq!(AcquisitionStage::Complete.progress(), 100);
        assert_eq!(AcquisitionStage::Geocoding.to_string(), "geocoding");
    }

    #[test]
    fn test_failure_invariants() {
        let result = ResolutionResult::failure(ErrorKind::RateLimited, "slow down", true);
        assert!(!result.succeeded);
        assert!(result.coordinate.is_none());
        assert_eq!(result.error_kind, Some(ErrorKind::RateLimited));
        assert!(!result.is_partial());
    }

    #[test]
    fn test_partial_success() {
        let coord = Coordinate::new(10.0, 20.0).unwrap();
        let result = ResolutionResult::located(
            coord,
            None,
            PlaceStatus::Unresolved {
                reason: "down".into(),
            },
            Origin::Device,
        )
        .missing_required_place("down");

        assert!(result.succeeded);
        assert!(result.is_partial());
        assert!(result.retryable);
        assert_eq!(result.error_kind, Some(ErrorKind::GeocodingFailed));
    }

    #[test]
    fn test_serialized_shape() {
        let coord = Coordinate::new(37.7749, -122.4194).unwrap();
        let result =
            ResolutionResult::located(coord, None, PlaceStatus::NotAttempted, Origin::Cache);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["succeeded"], true);
        assert_eq!(json["origin"], "cache");
        assert_eq!(json["placeStatus"]["state"], "notAttempted");
        assert_eq!(json["coordinate"]["longitude"], -122.4194);
    }
}
