//! Reverse-geocoding provider abstraction
//!
//! Each third-party service gets one adapter implementing
//! [`GeocodingProvider`]. Adapters only translate: they build a request from a
//! coordinate and parse that service's JSON into a [`PlaceName`]. The
//! [`GeocodingResolver`](crate::resolver::GeocodingResolver) performs the
//! actual HTTP calls through an [`AsyncHttpClient`].
//!
//! ```
//! use geolocate::coord::Coordinate;
//! use geolocate::provider::{GeocodingProvider, NominatimProvider};
//!
//! let provider = NominatimProvider::new();
//! let request = provider.build_request(&Coordinate::new(52.52, 13.405).unwrap());
//! assert!(request.url.contains("lat=52.52"));
//! ```

mod bigdatacloud;
mod factory;
mod http;
mod nominatim;
mod photon;
mod types;

pub use bigdatacloud::{BigDataCloudProvider, BIGDATACLOUD_BASE_URL};
pub use factory::{ProviderKind, UnknownProvider};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_HTTP_TIMEOUT};
pub use nominatim::{NominatimProvider, NOMINATIM_BASE_URL};
pub use photon::{PhotonProvider, PHOTON_BASE_URL};
pub use types::{GeocodeRequest, GeocodingProvider, PlaceName, ProviderError};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
