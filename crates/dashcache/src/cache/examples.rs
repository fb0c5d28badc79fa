//! Practical examples for cache usage patterns
//!
//! This module demonstrates how the dashboard services are expected to wire
//! up and use [`TimedCache`]: one cache instance per service, owned by the
//! composition root and injected into whatever needs it, never a module-level
//! singleton.

use std::sync::Arc;
use std::time::Duration;

use super::{CacheConfig, TimedCache};
use crate::key::QueryKey;

type AggregateCache = TimedCache<QueryKey, Arc<serde_json::Value>>;

/// Example: admin dashboard aggregate cache
///
/// The admin screens (platform stats, user counts, open tickets) tolerate a
/// minute of staleness, so the service fronts its REST calls with a 60 second
/// cache keyed by query name.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use dashcache::{CacheConfig, QueryKey, TimedCache};
///
/// struct AdminDashboardService {
///     cache: TimedCache<QueryKey, Arc<serde_json::Value>>,
/// }
///
/// impl AdminDashboardService {
///     fn new() -> Self {
///         Self { cache: TimedCache::new(CacheConfig::from_secs(60)) }
///     }
///
///     async fn platform_stats(&self) -> Result<Arc<serde_json::Value>, String> {
///         let key = QueryKey::new("admin-stats").map_err(|e| e.to_string())?;
///         self.cache
///             .get_with(key, || async {
///                 // One authenticated REST call lives here in production.
///                 Ok(Arc::new(serde_json::json!({ "users": 1204, "trades": 98231 })))
///             })
///             .await
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), String> {
/// let service = AdminDashboardService::new();
/// let stats = service.platform_stats().await?;
/// assert_eq!(stats["users"], 1204);
/// # Ok(())
/// # }
/// ```
pub fn example_admin_dashboard_cache() -> AggregateCache {
    TimedCache::new(CacheConfig::from_secs(60))
}

/// Example: revenue chart cache
///
/// Revenue and growth series are heavier queries and change slowly, so the
/// revenue service uses a separate instance with a 120 second TTL. Separate
/// instances never share entries, even when key strings collide.
pub fn example_revenue_cache() -> AggregateCache {
    TimedCache::new(CacheConfig::new(Duration::from_secs(120)))
}

/// Example: using `Arc<V>` for large values to avoid expensive clones
///
/// Every hit clones the stored value out of the map. For large aggregate
/// payloads, wrap them in `Arc` so a hit clones a pointer instead of the
/// payload.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use dashcache::{CacheConfig, TimedCache};
///
/// #[derive(Clone)]
/// struct RevenueSeries {
///     points: Vec<(String, f64)>,
/// }
///
/// // Bad: every hit clones the whole Vec.
/// let _per_hit_copy: TimedCache<String, RevenueSeries> =
///     TimedCache::new(CacheConfig::from_secs(120));
///
/// // Good: every hit clones only the Arc.
/// let _shared: TimedCache<String, Arc<RevenueSeries>> =
///     TimedCache::new(CacheConfig::from_secs(120));
/// ```
pub fn example_arc_pattern() -> TimedCache<String, Arc<Vec<u8>>> {
    TimedCache::new(CacheConfig::from_secs(120))
}

/// Example: forcing a refresh after a mutation
///
/// When an admin edits something that feeds an aggregate (say, resolving a
/// support ticket), the screen invalidates the affected key so the next read
/// refetches instead of serving a value that is fresh by the clock but wrong
/// by the data.
///
/// # Example
/// ```
/// use dashcache::{CacheConfig, QueryKey, TimedCache};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), dashcache::CacheError> {
/// let cache: TimedCache<QueryKey, u64> = TimedCache::new(CacheConfig::from_secs(60));
/// let key = QueryKey::new("open-tickets")?;
///
/// cache.insert(key.clone(), 12).await;
///
/// // Ticket resolved through the support screen:
/// cache.remove(&key).await;
/// assert!(cache.peek(&key).await.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn example_invalidate_after_mutation(cache: &TimedCache<QueryKey, u64>, key: &QueryKey) {
    cache.remove(key).await;
}
