//! HTTP transport for geocoding requests.
//!
//! The resolver never touches reqwest directly; it hands each
//! [`GeocodeRequest`] to an [`AsyncHttpClient`], which lets tests substitute
//! canned responses.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::types::{GeocodeRequest, ProviderError};

/// Default per-request timeout for geocoding calls.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifies this library to geocoding services.
///
/// Set on every reqwest request. Nominatim also puts it on its own request
/// so custom [`AsyncHttpClient`] implementations forward it.
pub(crate) const USER_AGENT: &str = concat!("geolocate/", env!("CARGO_PKG_VERSION"));

/// Executes geocoding GET requests.
///
/// Implementations return the raw body of a 2xx response. Anything else is a
/// [`ProviderError`] so the resolver can move on to the next provider.
pub trait AsyncHttpClient: Send + Sync {
    fn fetch(
        &self,
        request: &GeocodeRequest,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// reqwest-backed client used in production.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Client whose requests give up after `timeout`.
    ///
    /// A slow provider then surfaces as [`ProviderError::Timeout`] instead of
    /// stalling the whole fallback chain.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::HttpError(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

/// Translate a reqwest failure, keeping timeouts distinguishable.
fn transport_error(url: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(url.to_string())
    } else {
        ProviderError::HttpError(error.to_string())
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn fetch(&self, request: &GeocodeRequest) -> Result<Vec<u8>, ProviderError> {
        let url = request.url.as_str();
        trace!(url, headers = request.headers.len(), "Geocoding request");

        let builder = request
            .headers
            .iter()
            .fold(self.client.get(url), |builder, (name, value)| {
                builder.header(name.as_str(), value.as_str())
            });

        let response = builder.send().await.map_err(|e| {
            warn!(url, error = %e, connect = e.is_connect(), "Geocoding request failed");
            transport_error(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Geocoding provider returned error status");
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| transport_error(url, e))?;
        debug!(url, bytes = body.len(), "Geocoding response received");
        Ok(body.to_vec())
    }
}
