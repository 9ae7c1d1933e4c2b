//! TTL Cache Module
//!
//! The public handle: a shared entry table plus the sweep task that owns its expiry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{lock_store, CacheStats, CacheStore, SharedStore, MAX_TTL, MIN_TTL};
use crate::tasks::spawn_sweep_task;

// == TTL Cache ==
/// Time-bounded byte-string cache keyed by string.
///
/// Every entry lives for the same `ttl`, measured from insertion. One
/// background task per cache sweeps stale entries every `ttl`; lookups also
/// check freshness themselves, so an expired entry is never served while it
/// waits for the sweep.
///
/// The sweep task stops when [`TtlCache::shutdown`] is awaited or when the
/// cache is dropped. Share a cache between callers with `Arc<TtlCache>`.
pub struct TtlCache {
    store: SharedStore,
    ttl: Duration,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// `ttl` is clamped into [`MIN_TTL`]..=[`MAX_TTL`] so the sweep ticker
    /// always has a valid period.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.clamp(MIN_TTL, MAX_TTL);
        let store: SharedStore = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweep_task(Arc::clone(&store), ttl, shutdown_rx);

        info!(ttl_ms = ttl.as_millis() as u64, "Response cache created");

        Self {
            store,
            ttl,
            shutdown_tx,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Creates a cache whose TTL is given in whole seconds.
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::from_secs(ttl_secs))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        lock_store(&self.store).add(key.into(), value.into());
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// The returned `Bytes` is an immutable view; later writes to the same
    /// key do not affect it.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        lock_store(&self.store).get(key)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        lock_store(&self.store).stats()
    }

    pub fn len(&self) -> usize {
        lock_store(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_store(&self.store).is_empty()
    }

    // == Shutdown ==
    /// Stops the sweep task and waits for it to finish.
    ///
    /// Idempotent. Entries remain readable afterwards, but nothing removes
    /// them any more; lookups still refuse expired ones.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Cache sweep task ended abnormally: {}", e);
            }
        }
    }

    /// Returns true once the sweep task has exited.
    pub fn is_shut_down(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
