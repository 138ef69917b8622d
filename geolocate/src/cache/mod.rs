//! Short-TTL cache for resolved locations.
//!
//! Maps a logical key to the last resolved coordinate/place pair. The
//! controller uses the single [`CURRENT_LOCATION_KEY`], but any string key is
//! accepted.

mod memory;
mod stats;
mod types;

pub use memory::LocationCache;
pub use stats::CacheStats;
pub use types::{CacheEntry, CURRENT_LOCATION_KEY};
