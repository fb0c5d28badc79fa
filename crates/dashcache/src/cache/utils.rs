//! Cache utilities for monitoring and reporting
//!
//! This module provides helper utilities for keeping an eye on a dashboard
//! cache in production: a health check over the stats snapshot and a metrics
//! reporter for structured logging.

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "observability")]
use tracing::{info, warn};

use super::{CacheStats, TimedCache};
use crate::clock::Clock;

/// Cache health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHealth {
    /// Cache is operating normally
    Healthy,
    /// Cache hit rate is low, consider tuning the TTL
    LowHitRate,
    /// Producers are failing often, the upstream API is likely degraded
    HighErrorRate,
    /// Cache has both a low hit rate and a high producer error rate
    Critical,
}

impl fmt::Display for CacheHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::LowHitRate => write!(f, "Low Hit Rate"),
            Self::HighErrorRate => write!(f, "High Error Rate"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Cache health report with diagnostics
#[derive(Debug, Clone)]
pub struct CacheHealthReport {
    /// Overall health status
    pub health: CacheHealth,
    /// Current cache statistics
    pub stats: CacheStats,
    /// Recommendations for optimization
    pub recommendations: Vec<String>,
}

impl CacheHealthReport {
    /// Generate a health report for a cache
    ///
    /// # Thresholds
    /// - Low hit rate: < 50% over more than 100 accesses
    /// - High error rate: > 20% of refresh attempts over more than 20 attempts
    ///
    /// # Example
    /// ```
    /// use dashcache::cache::utils::CacheHealthReport;
    /// use dashcache::{CacheConfig, TimedCache};
    ///
    /// let config = CacheConfig::builder().track_metrics(true).build();
    /// let cache: TimedCache<String, u32> = TimedCache::new(config);
    ///
    /// let report = CacheHealthReport::new(&cache);
    /// println!("{}", report);
    /// ```
    pub fn new<K, V, C>(cache: &TimedCache<K, V, C>) -> Self
    where
        K: Eq + Hash + Clone,
        V: Clone,
        C: Clock + Clone,
    {
        let stats = cache.stats();
        let mut recommendations = Vec::new();

        let low_hit_rate = stats.hit_rate() < 0.5 && stats.total_accesses() > 100;
        if low_hit_rate {
            recommendations.push(format!(
                "Hit rate is {:.2}%. Consider increasing the TTL for this dashboard query set.",
                stats.hit_rate() * 100.0
            ));
        }

        let refresh_attempts = stats.refreshes + stats.producer_errors;
        let high_error_rate = stats.refresh_error_rate() > 0.2 && refresh_attempts > 20;
        if high_error_rate {
            recommendations.push(format!(
                "{:.2}% of refreshes failed. Check the upstream API before tuning the cache.",
                stats.refresh_error_rate() * 100.0
            ));
        }

        // The cache has no size bound; a large entry count means the caller
        // is minting keys outside the expected fixed dashboard set.
        if stats.size > 1_000 {
            recommendations.push(format!(
                "{} entries stored. Key cardinality is far above a dashboard workload; \
                 consider a bounded cache instead.",
                stats.size
            ));
        }

        let health = match (low_hit_rate, high_error_rate) {
            (true, true) => CacheHealth::Critical,
            (true, false) => CacheHealth::LowHitRate,
            (false, true) => CacheHealth::HighErrorRate,
            (false, false) => CacheHealth::Healthy,
        };

        Self { health, stats, recommendations }
    }

    /// Log the health report using tracing (requires `observability` feature)
    #[cfg(feature = "observability")]
    pub fn log(&self) {
        match self.health {
            CacheHealth::Healthy => {
                info!(
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    size = self.stats.size,
                    "Cache health check: Healthy"
                );
            }
            CacheHealth::LowHitRate | CacheHealth::HighErrorRate | CacheHealth::Critical => {
                warn!(
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    refresh_error_rate = self.stats.refresh_error_rate(),
                    size = self.stats.size,
                    "Cache health check: Issues detected"
                );
                for rec in &self.recommendations {
                    warn!(recommendation = %rec, "Cache optimization recommendation");
                }
            }
        }
    }
}

impl fmt::Display for CacheHealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Health Report")?;
        writeln!(f, "===================")?;
        writeln!(f, "Status: {}", self.health)?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Size: {}", self.stats.size)?;
        writeln!(f, "  Hits: {}", self.stats.hits)?;
        writeln!(f, "  Misses: {}", self.stats.misses)?;
        writeln!(f, "  Hit Rate: {:.2}%", self.stats.hit_rate() * 100.0)?;
        writeln!(f, "  Refreshes: {}", self.stats.refreshes)?;
        writeln!(f, "  Coalesced: {}", self.stats.coalesced)?;
        writeln!(f, "  Producer Errors: {}", self.stats.producer_errors)?;
        writeln!(f, "  Invalidations: {}", self.stats.invalidations)?;
        writeln!(f, "  Expirations: {}", self.stats.expirations)?;

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }

        Ok(())
    }
}

/// Cache metrics reporter for periodic monitoring
///
/// # Example
/// ```
/// use dashcache::cache::utils::MetricsReporter;
/// use dashcache::{CacheConfig, TimedCache};
///
/// let config = CacheConfig::builder().track_metrics(true).build();
/// let cache: TimedCache<String, u32> = TimedCache::new(config);
///
/// let reporter = MetricsReporter::new("admin_dashboard");
/// let json = reporter.report_json(&cache);
/// assert_eq!(json["cache_name"], "admin_dashboard");
/// ```
pub struct MetricsReporter {
    cache_name: String,
}

impl MetricsReporter {
    /// Create a new metrics reporter
    pub fn new(cache_name: impl Into<String>) -> Self {
        Self { cache_name: cache_name.into() }
    }

    /// Report current cache metrics using tracing (requires `observability`
    /// feature)
    #[cfg(feature = "observability")]
    pub fn report<K, V, C>(&self, cache: &TimedCache<K, V, C>)
    where
        K: Eq + Hash + Clone,
        V: Clone,
        C: Clock + Clone,
    {
        let stats = cache.stats();
        info!(
            cache = %self.cache_name,
            size = stats.size,
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = format!("{:.2}%", stats.hit_rate() * 100.0),
            refreshes = stats.refreshes,
            coalesced = stats.coalesced,
            producer_errors = stats.producer_errors,
            "Cache metrics report"
        );
    }

    /// Report metrics in JSON format (for structured logging)
    pub fn report_json<K, V, C>(&self, cache: &TimedCache<K, V, C>) -> serde_json::Value
    where
        K: Eq + Hash + Clone,
        V: Clone,
        C: Clock + Clone,
    {
        let stats = cache.stats();
        serde_json::json!({
            "cache_name": self.cache_name,
            "size": stats.size,
            "hits": stats.hits,
            "misses": stats.misses,
            "hit_rate": stats.hit_rate(),
            "miss_rate": stats.miss_rate(),
            "refreshes": stats.refreshes,
            "coalesced": stats.coalesced,
            "producer_errors": stats.producer_errors,
            "refresh_error_rate": stats.refresh_error_rate(),
            "invalidations": stats.invalidations,
            "expirations": stats.expirations,
            "total_accesses": stats.total_accesses(),
        })
    }
}
