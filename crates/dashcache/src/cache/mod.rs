//! Read-through caching with TTL-based freshness.
//!
//! This module provides [`TimedCache`], the memoization layer the dashboard
//! services put in front of the remote REST API. An entry is *fresh* while
//! strictly less time than the configured TTL has elapsed since it was
//! stored, and *stale* afterwards; staleness is recomputed from the clock on
//! every read rather than tracked by a background sweeper, so stale entries
//! simply stop being served until a refresh replaces them or they are
//! explicitly removed.
//!
//! # Features
//!
//! - **Read-through**: a fresh entry is returned without touching the
//!   producer; a miss or stale entry awaits the producer and stores its result
//! - **Error pass-through**: a failing producer propagates its error unchanged
//!   and never overwrites or deletes a stored entry
//! - **Refresh coalescing**: concurrent misses for one key share a single
//!   producer call instead of issuing duplicate requests
//! - **Thread-safe**: storage lives behind `tokio::sync::RwLock`; clones of a
//!   cache handle share one entry map
//! - **Metrics**: optional hit/miss/refresh statistics
//! - **Testable**: clock abstraction for deterministic TTL tests
//!
//! # Examples
//!
//! ## Read-through fetch
//! ```
//! use std::time::Duration;
//!
//! use dashcache::{CacheConfig, TimedCache};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), String> {
//! let cache: TimedCache<String, Vec<u64>> =
//!     TimedCache::new(CacheConfig::new(Duration::from_secs(120)));
//!
//! let series = cache
//!     .get_with("revenue-monthly".to_string(), || async {
//!         // One outbound REST call lives here in production.
//!         Ok::<_, String>(vec![1200, 1340, 1105])
//!     })
//!     .await?;
//! assert_eq!(series.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Explicit invalidation
//! ```
//! use std::time::Duration;
//!
//! use dashcache::{CacheConfig, TimedCache};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cache: TimedCache<String, u32> =
//!     TimedCache::new(CacheConfig::new(Duration::from_secs(60)));
//!
//! cache.insert("open-tickets".to_string(), 9).await;
//! cache.remove(&"open-tickets".to_string()).await;
//! assert!(cache.peek(&"open-tickets".to_string()).await.is_none());
//! # }
//! ```
//!
//! ## Cache statistics
//! ```
//! use std::time::Duration;
//!
//! use dashcache::{CacheConfig, TimedCache};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = CacheConfig::builder().ttl(Duration::from_secs(60)).track_metrics(true).build();
//! let cache: TimedCache<String, u32> = TimedCache::new(config);
//!
//! cache.insert("admin-stats".to_string(), 1).await;
//! let _ = cache.peek(&"admin-stats".to_string()).await;
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! # }
//! ```

mod config;
mod core;
pub mod examples;
mod stats;
pub mod utils;

// Re-export public API
pub use self::core::TimedCache;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use stats::CacheStats;
