//! In-memory location cache with read-time expiry.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use super::stats::CacheStats;
use super::types::CacheEntry;

/// Short-TTL store for resolved locations.
///
/// Expiry is lazy: an entry older than the configured expiry is removed the
/// next time it is read, and never returned. There is no background sweep.
///
/// The cache is owned by a single controller and is not shared across
/// threads, so it needs no interior locking.
#[derive(Debug)]
pub struct LocationCache {
    entries: HashMap<String, CacheEntry>,
    expiry: Duration,
    stats: CacheStats,
}

impl LocationCache {
    /// Create an empty cache whose entries live for `expiry`.
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            expiry,
            stats: CacheStats::default(),
        }
    }

    /// Get a fresh entry.
    ///
    /// Returns `None` if the key is absent or its entry is older than the
    /// expiry; expired entries are evicted.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(key) else {
            self.stats.misses += 1;
            return None;
        };

        let age = entry.age(now);
        if age > self.expiry {
            tracing::trace!(key, age_ms = age.as_millis() as u64, "Location cache entry expired");
            self.entries.remove(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            return None;
        }

        self.stats.hits += 1;
        Some(entry.clone())
    }

    /// Store an entry, replacing any previous entry for `key`.
    pub fn put(&mut self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
