//! Cache statistics tracking.

/// Lookup counters for a [`LocationCache`](super::LocationCache).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped on read because they outlived the expiry.
    pub expirations: u64,
}

impl CacheStats {
    /// Hit rate in `[0, 1]`, or 0 when there were no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
