//! OpenStreetMap Nominatim reverse-geocoding provider.
//!
//! # API Endpoint
//!
//! - `https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat={LAT}&lon={LON}&zoom=10&addressdetails=1`
//!
//! Zoom 10 asks for city-level detail. The public instance requires an
//! identifying User-Agent and allows at most one request per second.
//!
//! Nominatim names settlements by size, so the city comes from the first
//! of `city`, `town`, `village` or `municipality` that is present.

use serde::Deserialize;

use super::http::USER_AGENT;
use super::types::{
    confidence_or, non_blank, GeocodeRequest, GeocodingProvider, PlaceName, ProviderError,
};
use crate::coord::Coordinate;

/// Public OpenStreetMap Nominatim instance.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Confidence reported when `importance` is missing.
const DEFAULT_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    importance: Option<f64>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    town: Option<String>,
    #[serde(default)]
    village: Option<String>,
    #[serde(default)]
    municipality: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Nominatim reverse-geocoding adapter.
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    base_url: String,
}

impl NominatimProvider {
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_BASE_URL)
    }

    /// Points the adapter at a self-hosted Nominatim.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingProvider for NominatimProvider {
    fn name(&self) -> &str {
        "nominatim"
    }

    fn build_request(&self, coordinate: &Coordinate) -> GeocodeRequest {
        GeocodeRequest::get(format!(
            "{}?format=jsonv2&lat={}&lon={}&zoom=10&addressdetails=1",
            self.base_url, coordinate.latitude, coordinate.longitude
        ))
        .with_header("User-Agent", USER_AGENT)
        .with_header("Accept-Language", "en")
    }

    fn parse_response(&self, body: &[u8]) -> Result<PlaceName, ProviderError> {
        let response: NominatimResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", self.name(), e)))?;

        if let Some(error) = response.error {
            return Err(ProviderError::InvalidResponse(format!(
                "{}: {}",
                self.name(),
                error
            )));
        }

        let address = response.address.unwrap_or_default();
        let city = non_blank(address.city)
            .or_else(|| non_blank(address.town))
            .or_else(|| non_blank(address.village))
            .or_else(|| non_blank(address.municipality));

        Ok(PlaceName {
            city,
            region: non_blank(address.state),
            country: non_blank(address.country),
            confidence: confidence_or(response.importance, DEFAULT_CONFIDENCE),
            provider_name: self.name().to_string(),
        })
    }
}
