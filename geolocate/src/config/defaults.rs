//! Default values and constants for resolver configuration.

use std::time::Duration;

use crate::provider::ProviderKind;

/// Timeout for the first position request of a session.
pub const DEFAULT_INITIAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for manual retries, which usually run after a cold-start failure.
pub const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_secs(20);

/// Manual retries allowed between successes.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// How long a resolved location stays fresh.
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(5 * 60);

/// Minimum gap between consecutive acquisition attempts.
pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(1);

/// Per-request timeout for geocoding HTTP calls.
pub const DEFAULT_HTTP_TIMEOUT: Duration = crate::provider::DEFAULT_HTTP_TIMEOUT;

/// Base delay for retry backoff.
pub const RETRY_BACKOFF_BASE: Duration = Duration::from_millis(1000);

/// Upper bound for retry backoff.
pub const RETRY_BACKOFF_MAX: Duration = Duration::from_millis(5000);

/// Default provider priority.
pub fn default_provider_order() -> Vec<ProviderKind> {
    ProviderKind::ALL.to_vec()
}
