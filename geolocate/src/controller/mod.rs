//! Location acquisition orchestration.
//!
//! [`AcquisitionController`] is the only component embedding applications
//! call directly. It owns the configuration, the location cache and the
//! rate-limit state, and drives the [`LocationSource`](crate::source::LocationSource)
//! and [`GeocodingResolver`](crate::resolver::GeocodingResolver).
//!
//! ```ignore
//! use geolocate::config::ResolverConfig;
//! use geolocate::controller::{AcquireOptions, AcquisitionController};
//!
//! let mut controller = AcquisitionController::with_default_client(device, ResolverConfig::default())?;
//! let result = controller.acquire_location(AcquireOptions::city_only(), None).await;
//! if let Some(city) = result.city() {
//!     println!("You are in {city}");
//! }
//! ```

mod acquisition;
mod types;

pub use acquisition::AcquisitionController;
pub use types::{
    AcquireOptions, AcquisitionStage, Origin, PlaceStatus, PrivacyMode, ProgressFn,
    ResolutionResult,
};
