//! Cache configuration types and builder patterns
//!
//! This module provides configuration for [`TimedCache`]: the time-to-live
//! shared by every entry of one cache instance, metrics tracking, and refresh
//! coalescing. The TTL is fixed at construction; the two dashboard services
//! observed in production use 60 s (admin stats) and 120 s (revenue charts).
//!
//! [`TimedCache`]: super::TimedCache

use std::time::Duration;

/// Default TTL applied when the builder is not given one (the admin
/// dashboard's 60 second window).
const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time-to-live shared by all entries of the instance.
    ///
    /// An entry is fresh while strictly less than this has elapsed since it
    /// was stored. A zero TTL is permitted and makes every read a miss.
    pub ttl: Duration,

    /// Whether to collect hit/miss/refresh metrics
    pub track_metrics: bool,

    /// Whether concurrent misses for one key share a single producer call
    pub coalesce_refreshes: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL, track_metrics: false, coalesce_refreshes: true }
    }
}

impl CacheConfig {
    /// Create a configuration with the given TTL and default behavior.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    ///
    /// use dashcache::CacheConfig;
    ///
    /// let config = CacheConfig::new(Duration::from_secs(120));
    /// assert_eq!(config.ttl, Duration::from_secs(120));
    /// ```
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, ..Self::default() }
    }

    /// Convenience preset for a TTL given in whole seconds.
    ///
    /// # Example
    /// ```
    /// use dashcache::CacheConfig;
    ///
    /// let config = CacheConfig::from_secs(60);
    /// ```
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Create a new configuration builder
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }
}

/// Builder for CacheConfig with fluent API
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set time-to-live for entries
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.config.ttl = duration;
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Enable or disable refresh coalescing
    pub fn coalesce_refreshes(mut self, enabled: bool) -> Self {
        self.config.coalesce_refreshes = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
