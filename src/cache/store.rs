//! Cache Store Module
//!
//! The entry table behind the response cache. `CacheStore` itself is not
//! synchronised; it is shared as a [`SharedStore`] and every access goes
//! through [`lock_store`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

/// The entry table as shared between callers and the sweep task.
pub type SharedStore = Arc<Mutex<CacheStore>>;

/// Acquires exclusive access to the table.
///
/// Every mutation is a single map operation, so a panic while the lock was
/// held cannot leave the table half-updated; a poisoned lock is recovered.
pub fn lock_store(store: &Mutex<CacheStore>) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Cache Store ==
/// Key to byte-string table with a single fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamping it with the current time.
    pub fn add(&mut self, key: String, value: Bytes) {
        debug!(key = %key, bytes = value.len(), "Cache added");
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value stored under `key` if it is present and still fresh.
    ///
    /// A logically expired entry is reported as a miss but stays in the table
    /// until the next sweep.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                debug!(key = %key, "Cache hit");
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(key = %key, "Cache miss (expired)");
                self.stats.record_miss();
                None
            }
            None => {
                debug!(key = %key, "Cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose `created_at + ttl` is at or before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(ttl, now));
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Sweeps against the current time.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of entries physically present, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn store() -> CacheStore {
        CacheStore::new(Duration::from_secs(5))
    }

    #[test]
    fn test_store_new() {
        let store = store();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_store_add_and_get() {
        let mut store = store();

        store.add("https://example.com".to_string(), Bytes::from("testdata"));
        let value = store.get("https://example.com").unwrap();

        assert_eq!(value, Bytes::from("testdata"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store();
        assert!(store.get("https://example.com").is_none());
    }

    #[test]
    fn test_store_keys_are_exact() {
        let mut store = store();
        store.add("https://example.com/Path".to_string(), Bytes::from("a"));

        assert!(store.get("https://example.com/path").is_none());
        assert!(store.get("https://example.com/Path ").is_none());
        assert!(store.get("https://example.com/Path").is_some());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store();

        store.add("key1".to_string(), Bytes::from("value1"));
        store.add("key1".to_string(), Bytes::from("value2"));

        assert_eq!(store.get("key1").unwrap(), Bytes::from("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let mut store = CacheStore::new(Duration::from_millis(100));

        store.add("key1".to_string(), Bytes::from("value1"));
        sleep(Duration::from_millis(70));
        store.add("key1".to_string(), Bytes::from("value2"));
        sleep(Duration::from_millis(70));

        assert_eq!(store.get("key1").unwrap(), Bytes::from("value2"));
    }

    #[test]
    fn test_store_get_reports_expired_as_miss() {
        let mut store = CacheStore::new(Duration::from_millis(50));

        store.add("key1".to_string(), Bytes::from("value1"));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        // Not swept yet, but no longer served
        assert!(store.get("key1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = CacheStore::new(Duration::from_millis(100));

        store.add("old".to_string(), Bytes::from("value1"));
        sleep(Duration::from_millis(60));
        store.add("new".to_string(), Bytes::from("value2"));
        sleep(Duration::from_millis(60));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("new").is_some());
        assert_eq!(store.stats().expired, 1);
    }

    #[test]
    fn test_store_sweep_boundary_is_inclusive() {
        let mut store = CacheStore::new(Duration::from_secs(5));
        store.add("key".to_string(), Bytes::from("v"));

        let now = Instant::now();
        assert_eq!(store.sweep_expired_at(now), 0);
        assert_eq!(store.sweep_expired_at(now + Duration::from_secs(5)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_stats() {
        let mut store = store();

        store.add("key1".to_string(), Bytes::from("value1"));
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_lock_store_recovers_from_poison() {
        let shared: SharedStore = Arc::new(Mutex::new(store()));
        lock_store(&shared).add("key".to_string(), Bytes::from("v"));

        let poisoner = Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(shared.is_poisoned());
        assert_eq!(lock_store(&shared).get("key").unwrap(), Bytes::from("v"));
    }
}
