//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached response body and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    pub value: Bytes,
    /// Insertion time; reads never refresh it
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose `created_at + ttl` is at or before
    /// `now` is expired. Compared by elapsed time so no TTL can overflow.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }

    /// Checks if the entry has outlived `ttl` as of the current time.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, Instant::now())
    }
}
