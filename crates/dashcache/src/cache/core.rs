//! Core read-through cache implementation.
//!
//! [`TimedCache`] keys stored values by an opaque identifier and bounds their
//! freshness with a single TTL fixed at construction. Reads go through
//! [`TimedCache::get_with`]: a fresh entry is returned directly, anything
//! else awaits the caller's producer and stores its result. Stale entries are
//! never swept in the background; they are ignored until a refresh replaces
//! them or they are explicitly removed.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, RwLock};

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::clock::{Clock, SystemClock};

/// A stored value together with the instant it was written.
///
/// Entries are replaced wholesale on refresh; the value is never mutated in
/// place.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Generic keyed read-through cache with a fixed time-to-live.
///
/// Uses `tokio::sync::RwLock` for concurrent access. Instances never share
/// entries, even for identical key strings; clones of one instance share the
/// same entry map.
///
/// # Type Parameters
///
/// * `K` - Key type (must implement `Eq + Hash + Clone`)
/// * `V` - Value type (must implement `Clone`)
/// * `C` - Clock type for time operations (defaults to `SystemClock`)
///
/// # Examples
///
/// ```
/// use dashcache::{CacheConfig, TimedCache};
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let cache: TimedCache<String, u64> = TimedCache::new(CacheConfig::from_secs(60));
///
///     let value = cache.get_with("admin-stats".to_string(), || async { Ok::<_, String>(17) }).await?;
///     assert_eq!(value, 17);
///     Ok(())
/// }
/// ```
pub struct TimedCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    /// Per-key refresh locks; present only while a refresh is in flight.
    inflight: Arc<Mutex<HashMap<K, Arc<Mutex<()>>>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> TimedCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new cache with the specified configuration and default
    /// system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> TimedCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    /// Creates a new cache with the specified configuration and clock.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            inflight: Arc::new(Mutex::new(HashMap::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Returns the freshest available value for `key`, producing it on demand.
    ///
    /// If a fresh entry exists it is returned without invoking `producer`.
    /// Otherwise `producer` is awaited; on success its result is stored with
    /// the current instant and returned, on failure the error is passed
    /// through unchanged and the stored state is left exactly as it was (an
    /// absent entry stays absent, a stale entry stays in place).
    ///
    /// When refresh coalescing is enabled (the default), concurrent calls for
    /// the same key during a miss window share one producer call: the first
    /// caller produces, later callers wait and return the freshly stored
    /// value. A failed producer satisfies only the caller that ran it; the
    /// next waiter runs its own producer.
    ///
    /// The producer is assumed to be safe to invoke repeatedly; the cache
    /// does not enforce idempotence.
    ///
    /// # Errors
    ///
    /// Returns whatever error `producer` resolved to, untouched.
    pub async fn get_with<F, Fut, E>(&self, key: K, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.lookup_fresh(&key).await {
            if self.config.track_metrics {
                self.metrics.record_hit();
            }
            return Ok(value);
        }

        if self.config.track_metrics {
            self.metrics.record_miss();
        }

        if self.config.coalesce_refreshes {
            self.refresh_coalesced(key, producer).await
        } else {
            self.refresh(key, producer).await
        }
    }

    /// Stores a value directly, replacing any previous entry for the key.
    ///
    /// Useful for warming the cache with values obtained out of band.
    pub async fn insert(&self, key: K, value: V) {
        self.store(key, value).await;
    }

    /// Returns the value for `key` if a fresh entry exists.
    ///
    /// Never invokes a producer and never mutates storage; a stale entry is
    /// reported as `None` but left in place.
    pub async fn peek(&self, key: &K) -> Option<V> {
        let value = self.lookup_fresh(key).await;
        if self.config.track_metrics {
            match value {
                Some(_) => self.metrics.record_hit(),
                None => self.metrics.record_miss(),
            }
        }
        value
    }

    /// Checks whether a fresh entry exists for `key`.
    pub async fn contains_key(&self, key: &K) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).is_some_and(|entry| self.is_fresh(entry))
    }

    /// Removes the entry for `key`, returning its value if one was present.
    ///
    /// Removing an absent key is a no-op. Removal ignores freshness: the next
    /// `get_with` for the key will invoke its producer no matter how recently
    /// the key was populated.
    pub async fn remove(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write().await;
        let removed = entries.remove(key).map(|entry| entry.value);
        if removed.is_some() && self.config.track_metrics {
            self.metrics.record_invalidations(1);
        }
        removed
    }

    /// Removes every entry from the cache.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.len() as u64;
        entries.clear();
        if count > 0 && self.config.track_metrics {
            self.metrics.record_invalidations(count);
        }
    }

    /// Removes all stale entries and returns the count of removed entries.
    ///
    /// This is the only removal path for stale entries besides replacement
    /// and explicit `remove`/`clear`; nothing sweeps them automatically.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;

        let stale_keys: Vec<K> = entries
            .iter()
            .filter(|(_, entry)| !self.is_fresh(entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale_keys {
            entries.remove(key);
            if self.config.track_metrics {
                self.metrics.record_expiration();
            }
        }

        stale_keys.len()
    }

    /// Returns the current number of entries, fresh and stale.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.is_empty()
    }

    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns current cache statistics.
    ///
    /// Note: This method uses a non-blocking read. If the entry map is
    /// currently locked, the size will be reported as 0 in the snapshot.
    pub fn stats(&self) -> CacheStats {
        let size = self.entries.try_read().map(|entries| entries.len()).unwrap_or(0);
        self.metrics.snapshot(size)
    }

    /// Fetches a value if a fresh entry exists, without recording metrics.
    async fn lookup_fresh(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if self.is_fresh(entry) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Freshness is strict: an entry whose age equals the TTL is stale.
    fn is_fresh(&self, entry: &CacheEntry<V>) -> bool {
        self.clock.now().duration_since(entry.stored_at) < self.config.ttl
    }

    async fn store(&self, key: K, value: V) {
        let entry = CacheEntry { value, stored_at: self.clock.now() };
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
        if self.config.track_metrics {
            self.metrics.record_refresh();
        }
    }

    /// Runs the producer and stores its result on success.
    async fn refresh<F, Fut, E>(&self, key: K, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        match producer().await {
            Ok(value) => {
                self.store(key, value.clone()).await;
                Ok(value)
            }
            Err(err) => {
                if self.config.track_metrics {
                    self.metrics.record_producer_error();
                }
                Err(err)
            }
        }
    }

    /// Serializes refreshes for one key on a per-key lock so concurrent
    /// misses share a single producer call.
    async fn refresh_coalesced<F, Fut, E>(&self, key: K, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let flight = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(inflight.entry(key.clone()).or_default())
        };

        let result = {
            let _guard = flight.lock().await;
            match self.lookup_fresh(&key).await {
                // Another caller refreshed this key while we waited.
                Some(value) => {
                    if self.config.track_metrics {
                        self.metrics.record_coalesced();
                    }
                    Ok(value)
                }
                None => self.refresh(key.clone(), producer).await,
            }
        };

        // Retire the flight slot once no other caller still holds it. The
        // count is the map's reference plus our own clone.
        let mut inflight = self.inflight.lock().await;
        if let Some(slot) = inflight.get(&key) {
            if Arc::strong_count(slot) <= 2 {
                inflight.remove(&key);
            }
        }

        result
    }
}

impl<K, V, C> Clone for TimedCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            inflight: Arc::clone(&self.inflight),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
