//! Provider factory for building adapters from configuration.
//!
//! Configuration refers to adapters by identifier; [`ProviderKind`] maps
//! those identifiers to concrete [`GeocodingProvider`] implementations.
//!
//! ```
//! use geolocate::provider::ProviderKind;
//!
//! let kind: ProviderKind = "nominatim".parse().unwrap();
//! let provider = kind.create();
//! assert_eq!(provider.name(), "nominatim");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::bigdatacloud::BigDataCloudProvider;
use super::nominatim::NominatimProvider;
use super::photon::PhotonProvider;
use super::types::GeocodingProvider;

/// Identifier for a built-in reverse-geocoding adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// BigDataCloud client-side endpoint. No API key required.
    BigDataCloud,
    /// OpenStreetMap Nominatim. No API key, one request per second.
    Nominatim,
    /// Komoot Photon. No API key required.
    Photon,
}

impl ProviderKind {
    /// All built-in adapters in default priority order.
    pub const ALL: [ProviderKind; 3] = [Self::BigDataCloud, Self::Nominatim, Self::Photon];

    /// Configuration identifier for this adapter.
    pub fn id(&self) -> &'static str {
        match self {
            Self::BigDataCloud => "bigdatacloud",
            Self::Nominatim => "nominatim",
            Self::Photon => "photon",
        }
    }

    /// Creates the adapter with its public endpoint.
    pub fn create(&self) -> Arc<dyn GeocodingProvider> {
        match self {
            Self::BigDataCloud => Arc::new(BigDataCloudProvider::new()),
            Self::Nominatim => Arc::new(NominatimProvider::new()),
            Self::Photon => Arc::new(PhotonProvider::new()),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for an unrecognised provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown geocoding provider '{0}' (expected one of: bigdatacloud, nominatim, photon)")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(UnknownProvider(s.trim().to_string()))
    }
}
