//! Komoot Photon reverse-geocoding provider.
//!
//! Photon answers with a GeoJSON `FeatureCollection`; the nearest match is
//! the first feature.
//!
//! - `https://photon.komoot.io/reverse?lat={LAT}&lon={LON}`

use serde::Deserialize;

use super::types::{non_blank, GeocodeRequest, GeocodingProvider, PlaceName, ProviderError};
use crate::coord::Coordinate;

/// Public Photon instance.
pub const PHOTON_BASE_URL: &str = "https://photon.komoot.io/reverse";

/// Photon does not score reverse results.
const DEFAULT_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    #[serde(default)]
    properties: PhotonProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PhotonProperties {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    osm_value: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Photon reverse-geocoding adapter.
#[derive(Debug, Clone)]
pub struct PhotonProvider {
    base_url: String,
}

impl PhotonProvider {
    pub fn new() -> Self {
        Self::with_base_url(PHOTON_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for PhotonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingProvider for PhotonProvider {
    fn name(&self) -> &str {
        "photon"
    }

    fn build_request(&self, coordinate: &Coordinate) -> GeocodeRequest {
        GeocodeRequest::get(format!(
            "{}?lat={}&lon={}&lang=en",
            self.base_url, coordinate.latitude, coordinate.longitude
        ))
    }

    fn parse_response(&self, body: &[u8]) -> Result<PlaceName, ProviderError> {
        let response: PhotonResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", self.name(), e)))?;

        let properties = response
            .features
            .into_iter()
            .next()
            .map(|f| f.properties)
            .ok_or_else(|| {
                ProviderError::InvalidResponse(format!("{}: no features", self.name()))
            })?;

        // A feature that is itself a settlement carries its name in `name`.
        let is_settlement = matches!(
            properties.osm_value.as_deref(),
            Some("city" | "town" | "village")
        );
        let city = non_blank(properties.city).or_else(|| {
            if is_settlement {
                non_blank(properties.name)
            } else {
                None
            }
        });

        Ok(PlaceName {
            city,
            region: non_blank(properties.state),
            country: non_blank(properties.country),
            confidence: DEFAULT_CONFIDENCE,
            provider_name: self.name().to_string(),
        })
    }
}
