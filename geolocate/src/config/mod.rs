//! Configuration for the location resolution service.
//!
//! [`ResolverConfig`] carries timeouts, the retry budget, cache policy and the
//! geocoding provider order. Build it in code or load it from the
//! `[location]` section of an INI file.
//!
//! ```
//! use geolocate::config::ResolverConfig;
//! use std::time::Duration;
//!
//! let config = ResolverConfig::default().with_max_retries(5);
//! assert_eq!(config.retry_timeout, Duration::from_secs(20));
//! ```

mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::*;
pub use file::ConfigFileError;
pub use settings::ResolverConfig;
