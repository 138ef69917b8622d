//! Resolver configuration struct.

use std::time::Duration;

use super::defaults::*;
use crate::provider::ProviderKind;

/// Configuration for an [`AcquisitionController`](crate::controller::AcquisitionController).
///
/// Constructed once and owned by the controller; it cannot be changed for
/// the controller's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Position timeout for the first attempt of a session.
    pub initial_timeout: Duration,
    /// Position timeout for manual retries.
    pub retry_timeout: Duration,
    /// Manual retries allowed since the last success.
    pub max_retries: u32,
    /// Lifetime of a cached location.
    pub cache_expiry: Duration,
    /// Minimum gap between acquisition attempts.
    pub rate_limit_interval: Duration,
    /// Per-request timeout for the default HTTP client.
    pub http_timeout: Duration,
    /// Geocoding providers, highest priority first.
    pub provider_order: Vec<ProviderKind>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            initial_timeout: DEFAULT_INITIAL_TIMEOUT,
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            cache_expiry: DEFAULT_CACHE_EXPIRY,
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            provider_order: default_provider_order(),
        }
    }
}

impl ResolverConfig {
    pub fn with_initial_timeout(mut self, timeout: Duration) -> Self {
        self.initial_timeout = timeout;
        self
    }

    pub fn with_retry_timeout(mut self, timeout: Duration) -> Self {
        self.retry_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_cache_expiry(mut self, expiry: Duration) -> Self {
        self.cache_expiry = expiry;
        self
    }

    pub fn with_provider_order(mut self, order: Vec<ProviderKind>) -> Self {
        self.provider_order = order;
        self
    }

    /// Delay before retry number `attempt` (1-based).
    ///
    /// `min(1000 * 2^(attempt-1), 5000)` milliseconds.
    pub fn retry_backoff(attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = RETRY_BACKOFF_BASE.saturating_mul(1u32 << exponent);
        delay.min(RETRY_BACKOFF_MAX)
    }
}
