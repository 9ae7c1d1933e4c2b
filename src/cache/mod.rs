//! Cache Module
//!
//! Provides an in-memory response cache with a fixed TTL and a background sweep.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{lock_store, CacheStore, SharedStore};
pub use ttl_cache::TtlCache;

// == Public Constants ==
/// Smallest TTL the cache accepts; shorter values are clamped up to it.
pub const MIN_TTL: std::time::Duration = std::time::Duration::from_millis(1);

/// Largest TTL the cache accepts (one year); longer values are clamped down to it.
pub const MAX_TTL: std::time::Duration = std::time::Duration::from_secs(365 * 24 * 60 * 60);
