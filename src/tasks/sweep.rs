//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{lock_store, SharedStore, MAX_TTL, MIN_TTL};

/// Spawns a background task that sweeps expired entries every `period`.
///
/// The first sweep happens one full period after spawning. Each sweep holds
/// the store lock only for the removal pass itself. `period` is clamped into
/// `MIN_TTL..=MAX_TTL`.
///
/// The task stops when `true` is sent on the shutdown channel or when the
/// sending half is dropped, whichever comes first.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_sweep_task(store.clone(), ttl, shutdown_rx);
/// // Later:
/// let _ = shutdown_tx.send(true);
/// handle.await?;
/// ```
pub fn spawn_sweep_task(
    store: SharedStore,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = period.clamp(MIN_TTL, MAX_TTL);

    tokio::spawn(async move {
        info!(period_ms = period.as_millis() as u64, "Starting cache sweep task");

        let now = Instant::now();
        let first_tick = now.checked_add(period).unwrap_or(now);
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Cache sweep task shutting down");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = lock_store(&store).sweep_expired();

                    if removed > 0 {
                        info!("Cache sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use bytes::Bytes;
    use std::sync::{Arc, Mutex};

    fn shared(ttl: Duration) -> SharedStore {
        Arc::new(Mutex::new(CacheStore::new(ttl)))
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let ttl = Duration::from_millis(100);
        let store = shared(ttl);
        lock_store(&store).add("expire_soon".to_string(), Bytes::from("value"));

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), ttl, shutdown_rx);

        // Expired after one period, physically gone after the next tick
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(lock_store(&store).is_empty(), "expired entry should be swept");
        assert_eq!(lock_store(&store).stats().expired, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_fresh_entries() {
        let store = shared(Duration::from_secs(3600));
        lock_store(&store).add("long_lived".to_string(), Bytes::from("value"));

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), Duration::from_millis(50), shutdown_rx);

        tokio::time::sleep(Duration::from_millis(180)).await;

        assert_eq!(
            lock_store(&store).get("long_lived").unwrap(),
            Bytes::from("value")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_stops_on_shutdown_signal() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let store = shared(Duration::from_secs(1));
        let handle = spawn_sweep_task(store, Duration::from_secs(1), shutdown_rx);

        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("sweep task should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweep_task_stops_when_sender_dropped() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let store = shared(Duration::from_secs(1));
        let handle = spawn_sweep_task(store, Duration::from_secs(1), shutdown_rx);

        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("sweep task should stop once its owner is gone")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweep_task_survives_huge_period() {
        let store = shared(Duration::MAX);
        lock_store(&store).add("k".to_string(), Bytes::from("v"));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweep_task(store.clone(), Duration::MAX, shutdown_rx);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "sweep task should still be running");
        assert!(lock_store(&store).get("k").is_some());

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_millis(500), handle)
            .await
            .expect("sweep task should stop promptly")
            .unwrap();
    }
}
