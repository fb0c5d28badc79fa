//! Read-through TTL caching for dashboard aggregate queries.
//!
//! The admin and user dashboards issue a small, fixed set of aggregate
//! queries against a remote REST API (platform stats, revenue series, user
//! growth, and so on). Those endpoints are expensive and their results do not
//! need to be fresher than a minute or two, so each dashboard service fronts
//! the API with a [`TimedCache`]: a keyed memoization layer that serves a
//! stored value while it is within its time-to-live and otherwise invokes the
//! caller-supplied producer, stores the result, and returns it.
//!
//! The cache owns nothing about transport: producers are plain async closures
//! and the caller keeps authentication, retries, and error shaping on its own
//! side. A producer failure is passed through unchanged and never disturbs
//! whatever entry was already stored.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dashcache::{CacheConfig, TimedCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let cache: TimedCache<String, u64> = TimedCache::new(CacheConfig::from_secs(60));
//!
//!     // First call misses and runs the producer.
//!     let total = cache.get_with("active-users".to_string(), || async { Ok::<_, String>(412) }).await?;
//!     assert_eq!(total, 412);
//!
//!     // Within the TTL the stored value is served and the producer is skipped.
//!     let again = cache
//!         .get_with("active-users".to_string(), || async { Err("unreachable".to_string()) })
//!         .await?;
//!     assert_eq!(again, 412);
//!     Ok(())
//! }
//! ```
//!
//! # Feature flags
//!
//! - `observability`: tracing output for [`cache::utils`] reporting
//! - `serde`: `Serialize` support for [`CacheStats`] snapshots

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod cache;
pub mod clock;
pub mod error;
pub mod key;

// Re-export commonly used types for convenience
// ------------------------------
pub use cache::{CacheConfig, CacheConfigBuilder, CacheStats, TimedCache};
pub use clock::{Clock, MockClock, SystemClock};
pub use error::CacheError;
pub use key::QueryKey;
