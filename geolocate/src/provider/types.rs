//! Provider types and traits

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::Coordinate;
use crate::error::ErrorKind;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Request did not complete within the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },
    /// Response body did not match the provider's schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Response parsed but carried no usable city name
    #[error("{0} returned no city for this position")]
    NoCity(String),
}

impl ProviderError {
    /// Classification for the public error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HttpError(_) | Self::Timeout(_) | Self::HttpStatus { .. } => {
                ErrorKind::NetworkFailure
            }
            Self::InvalidResponse(_) | Self::NoCity(_) => ErrorKind::GeocodingFailed,
        }
    }
}

/// Request descriptor produced by an adapter.
///
/// The resolver hands this to an [`AsyncHttpClient`](super::AsyncHttpClient)
/// as a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl GeocodeRequest {
    /// A GET with no extra headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Human-readable name for a position, normalized across providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Provider confidence in `[0, 1]`.
    pub confidence: f64,
    /// Name of the adapter that produced this result.
    pub provider_name: String,
}

impl PlaceName {
    /// Returns true if a non-blank city name is present.
    pub fn has_city(&self) -> bool {
        self.city.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

/// Reverse-geocoding adapter for one third-party service.
///
/// Adapters are pure translators: they never perform I/O themselves.
/// [`parse_response`](GeocodingProvider::parse_response) must not panic on
/// malformed input; any unexpected shape becomes a [`ProviderError`].
pub trait GeocodingProvider: Send + Sync {
    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Builds the GET request that reverse-geocodes `coordinate`.
    fn build_request(&self, coordinate: &Coordinate) -> GeocodeRequest;

    /// Parses a raw response body into a place name.
    fn parse_response(&self, body: &[u8]) -> Result<PlaceName, ProviderError>;
}

/// Trims a field and discards it if blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Uses the service's confidence when it is a valid probability.
pub(crate) fn confidence_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if (0.0..=1.0).contains(&v) => v,
        _ => default,
    }
}
