//! INI parsing logic for converting `Ini` → `ResolverConfig`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::time::Duration;

use super::file::ConfigFileError;
use super::settings::ResolverConfig;
use crate::provider::{ProviderKind, UnknownProvider};

const SECTION: &str = "location";

/// Parse an `Ini` object into a `ResolverConfig`.
///
/// Starts from `ResolverConfig::default()` and overlays any values found in
/// the `[location]` section.
pub(super) fn parse_ini(ini: &Ini) -> Result<ResolverConfig, ConfigFileError> {
    let mut config = ResolverConfig::default();

    let Some(section) = ini.section(Some(SECTION)) else {
        return Ok(config);
    };

    if let Some(v) = section.get("initial_timeout_ms") {
        config.initial_timeout = parse_millis("initial_timeout_ms", v)?;
    }
    if let Some(v) = section.get("retry_timeout_ms") {
        config.retry_timeout = parse_millis("retry_timeout_ms", v)?;
    }
    if let Some(v) = section.get("max_retries") {
        config.max_retries = v
            .trim()
            .parse()
            .map_err(|_| invalid("max_retries", v, "must be a non-negative integer"))?;
    }
    if let Some(v) = section.get("cache_expiry_ms") {
        config.cache_expiry = parse_millis("cache_expiry_ms", v)?;
    }
    if let Some(v) = section.get("rate_limit_ms") {
        config.rate_limit_interval = parse_millis("rate_limit_ms", v)?;
    }
    if let Some(v) = section.get("http_timeout_ms") {
        config.http_timeout = parse_millis("http_timeout_ms", v)?;
    }
    if let Some(v) = section.get("providers") {
        config.provider_order = parse_providers(v)?;
    }

    Ok(config)
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, value, "must be greater than zero")),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(invalid(key, value, "expected a duration in milliseconds")),
    }
}

fn parse_providers(value: &str) -> Result<Vec<ProviderKind>, ConfigFileError> {
    let mut order = Vec::new();

    for id in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: ProviderKind = id
            .parse()
            .map_err(|e: UnknownProvider| invalid("providers", value, &e.to_string()))?;
        if order.contains(&kind) {
            return Err(invalid(
                "providers",
                value,
                &format!("provider '{}' listed more than once", kind),
            ));
        }
        order.push(kind);
    }

    if order.is_empty() {
        return Err(invalid("providers", value, "at least one provider is required"));
    }

    Ok(order)
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: SECTION.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
