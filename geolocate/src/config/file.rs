//! Loading resolver configuration from INI files.
//!
//! Settings live in an optional `[location]` section so the embedding
//! application can keep them alongside its own configuration. Missing keys
//! keep their defaults.
//!
//! ```ini
//! [location]
//! initial_timeout_ms = 10000
//! retry_timeout_ms = 20000
//! max_retries = 3
//! cache_expiry_ms = 300000
//! rate_limit_ms = 1000
//! http_timeout_ms = 10000
//! providers = bigdatacloud, nominatim, photon
//! ```

use ini::Ini;
use std::path::Path;
use thiserror::Error;

use super::settings::ResolverConfig;

/// Errors from loading a `[location]` configuration.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but is unreadable or not valid INI.
    #[error("Cannot read location config: {0}")]
    ReadError(String),

    /// A key was present with a value that fails validation.
    #[error("Bad location setting {section}.{key} = '{value}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ResolverConfig {
    /// Read settings from an INI file.
    ///
    /// A missing file is not an error; every setting keeps its default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini =
            Ini::load_from_file(path).map_err(|e| ConfigFileError::ReadError(e.to_string()))?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigFileError> {
        let ini =
            Ini::load_from_str(content).map_err(|e| ConfigFileError::ReadError(e.to_string()))?;
        super::parser::parse_ini(&ini)
    }
}
