//! Sequential reverse-geocoding with provider fallback.
//!
//! The resolver walks its providers in priority order and stops at the first
//! one that names a city. Providers are never queried in parallel; a later
//! provider only sees traffic when every earlier one has failed.
//!
//! Timeouts are not retried here. The HTTP client's own timeout turns a slow
//! provider into an ordinary failure and the resolver moves on; whole-pipeline
//! retry is the [`AcquisitionController`](crate::controller::AcquisitionController)'s job.

use std::sync::Arc;

use thiserror::Error;

use crate::coord::{validate, Coordinate};
use crate::error::ErrorKind;
use crate::provider::{
    AsyncHttpClient, GeocodingProvider, PlaceName, ProviderError, ProviderKind,
};

/// Errors from [`GeocodingResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// Input failed validation; no provider was contacted.
    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Every provider failed. Carries the last provider's error.
    #[error("All {attempts} geocoding providers failed; last error: {last_error}")]
    AllProvidersFailed { attempts: usize, last_error: String },

    /// The resolver was built with an empty provider list.
    #[error("No geocoding providers configured")]
    NoProviders,
}

impl ResolveError {
    /// Classification for the public error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCoordinate { .. } => ErrorKind::InvalidCoordinate,
            Self::AllProvidersFailed { .. } | Self::NoProviders => ErrorKind::GeocodingFailed,
        }
    }
}

/// Tries geocoding providers in a fixed priority order.
pub struct GeocodingResolver<C: AsyncHttpClient> {
    http_client: C,
    providers: Vec<Arc<dyn GeocodingProvider>>,
}

impl<C: AsyncHttpClient> GeocodingResolver<C> {
    /// Creates a resolver over an explicit, ordered provider list.
    pub fn new(http_client: C, providers: Vec<Arc<dyn GeocodingProvider>>) -> Self {
        Self {
            http_client,
            providers,
        }
    }

    /// Creates a resolver from configured provider identifiers.
    pub fn from_kinds(http_client: C, kinds: &[ProviderKind]) -> Self {
        Self::new(http_client, kinds.iter().map(ProviderKind::create).collect())
    }

    /// Provider names in the order they will be tried.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolves a coordinate to a place name.
    ///
    /// Returns the first provider result with a non-empty city. Transport
    /// errors, non-2xx statuses, parse failures and missing cities all fall
    /// through to the next provider.
    pub async fn resolve(&self, coordinate: &Coordinate) -> Result<PlaceName, ResolveError> {
        if !validate(coordinate.latitude, coordinate.longitude) {
            tracing::debug!(
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "Refusing to geocode invalid coordinate"
            );
            return Err(ResolveError::InvalidCoordinate {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            });
        }

        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            match self.try_provider(provider.as_ref(), coordinate).await {
                Ok(place) => {
                    tracing::debug!(
                        provider = provider.name(),
                        city = place.city.as_deref().unwrap_or_default(),
                        confidence = place.confidence,
                        "Reverse geocoding succeeded"
                    );
                    return Ok(place);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "Reverse geocoding provider failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(ResolveError::AllProvidersFailed {
                attempts: self.providers.len(),
                last_error: e.to_string(),
            }),
            None => Err(ResolveError::NoProviders),
        }
    }

    async fn try_provider(
        &self,
        provider: &dyn GeocodingProvider,
        coordinate: &Coordinate,
    ) -> Result<PlaceName, ProviderError> {
        let request = provider.build_request(coordinate);
        let body = self.http_client.fetch(&request).await?;
        let place = provider.parse_response(&body)?;

        if !place.has_city() {
            return Err(ProviderError::NoCity(provider.name().to_string()));
        }

        Ok(place)
    }
}
