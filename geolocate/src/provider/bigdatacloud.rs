//! BigDataCloud reverse-geocoding provider.
//!
//! Uses the free client-side endpoint, which needs no API key:
//!
//! - `https://api.bigdatacloud.net/data/reverse-geocode-client?latitude={LAT}&longitude={LON}&localityLanguage=en`
//!
//! The service fills `city` for most populated places and falls back to
//! `locality` for rural positions.

use serde::Deserialize;

use super::types::{
    confidence_or, non_blank, GeocodeRequest, GeocodingProvider, PlaceName, ProviderError,
};
use crate::coord::Coordinate;

/// Default endpoint for client-side reverse geocoding.
pub const BIGDATACLOUD_BASE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Confidence reported when the response carries none.
const DEFAULT_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BigDataCloudResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    principal_subdivision: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// BigDataCloud reverse-geocoding adapter.
#[derive(Debug, Clone)]
pub struct BigDataCloudProvider {
    base_url: String,
}

impl BigDataCloudProvider {
    pub fn new() -> Self {
        Self::with_base_url(BIGDATACLOUD_BASE_URL)
    }

    /// Points the adapter at a different deployment of the same API.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BigDataCloudProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingProvider for BigDataCloudProvider {
    fn name(&self) -> &str {
        "bigdatacloud"
    }

    fn build_request(&self, coordinate: &Coordinate) -> GeocodeRequest {
        GeocodeRequest::get(format!(
            "{}?latitude={}&longitude={}&localityLanguage=en",
            self.base_url, coordinate.latitude, coordinate.longitude
        ))
    }

    fn parse_response(&self, body: &[u8]) -> Result<PlaceName, ProviderError> {
        let response: BigDataCloudResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", self.name(), e)))?;

        Ok(PlaceName {
            city: non_blank(response.city).or_else(|| non_blank(response.locality)),
            region: non_blank(response.principal_subdivision),
            country: non_blank(response.country_name),
            confidence: confidence_or(response.confidence, DEFAULT_CONFIDENCE),
            provider_name: self.name().to_string(),
        })
    }
}
