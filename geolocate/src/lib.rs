//! Geolocate - location resolution for personalization features
//!
//! Turns a device position into a human-readable place name (city, region,
//! country) for features such as local venue lists or weather, while
//! tolerating slow hardware, denied permissions and flaky geocoding services.
//!
//! # Architecture
//!
//! ```text
//! AcquisitionController
//!   ├── LocationSource        (device capability, raced against a timer)
//!   ├── coord::validate       (range checks on every coordinate)
//!   ├── GeocodingResolver     (ordered fallback across providers)
//!   │     └── GeocodingProvider: BigDataCloud → Nominatim → Photon
//!   └── LocationCache         (5 minute in-memory cache)
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use geolocate::config::ResolverConfig;
//! use geolocate::controller::{AcquireOptions, AcquisitionController};
//!
//! let config = ResolverConfig::load_from(Path::new("geolocate.ini"))?;
//! let mut controller = AcquisitionController::with_default_client(device_source, config)?;
//!
//! let result = controller.acquire_location(AcquireOptions::precise(), None).await;
//! match (result.succeeded, result.city()) {
//!     (true, Some(city)) => show_venues_near(city),
//!     (true, None) => show_venues_near_coordinates(result.coordinate),
//!     (false, _) if result.retryable => offer_retry(),
//!     (false, _) => ask_for_manual_city(),
//! }
//! ```

pub mod cache;
pub mod config;
pub mod controller;
pub mod coord;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resolver;
pub mod source;

pub use controller::{AcquireOptions, AcquisitionController, ResolutionResult};
pub use coord::{validate, Coordinate};
pub use error::ErrorKind;

/// Version of the geolocate library.
///
/// Injected from `Cargo.toml` at compile time and sent in the HTTP
/// User-Agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
