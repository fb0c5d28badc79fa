//! Cache statistics and metrics tracking
//!
//! This module provides types for tracking cache performance metrics
//! including hit rates, refresh counts, coalesced waits, and producer
//! failures.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CacheStats {
    /// Current number of entries (fresh and stale)
    pub size: usize,

    /// Total number of reads served from a fresh entry
    pub hits: u64,

    /// Total number of reads that found no fresh entry
    pub misses: u64,

    /// Total number of entries stored (producer results and manual inserts)
    pub refreshes: u64,

    /// Total number of misses satisfied by another caller's in-flight refresh
    pub coalesced: u64,

    /// Total number of producer failures passed through to callers
    pub producer_errors: u64,

    /// Total number of entries removed by `remove` or `clear`
    pub invalidations: u64,

    /// Total number of stale entries removed by `cleanup_expired`
    pub expirations: u64,
}

impl CacheStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Total number of access operations (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of refresh attempts that failed (errors / (refreshes +
    /// errors))
    pub fn refresh_error_rate(&self) -> f64 {
        let attempts = self.refreshes + self.producer_errors;
        if attempts == 0 {
            0.0
        } else {
            self.producer_errors as f64 / attempts as f64
        }
    }
}

/// Thread-safe metrics collector for cache operations
///
/// This struct uses atomic operations to track cache metrics
/// without requiring locks, enabling low-overhead monitoring.
#[derive(Debug)]
pub(crate) struct MetricsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    refreshes: Arc<AtomicU64>,
    coalesced: Arc<AtomicU64>,
    producer_errors: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
    expirations: Arc<AtomicU64>,
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
            refreshes: Arc::clone(&self.refreshes),
            coalesced: Arc::clone(&self.coalesced),
            producer_errors: Arc::clone(&self.producer_errors),
            invalidations: Arc::clone(&self.invalidations),
            expirations: Arc::clone(&self.expirations),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub(crate) fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            refreshes: Arc::new(AtomicU64::new(0)),
            coalesced: Arc::new(AtomicU64::new(0)),
            producer_errors: Arc::new(AtomicU64::new(0)),
            invalidations: Arc::new(AtomicU64::new(0)),
            expirations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a read served from a fresh entry
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read that found no fresh entry
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stored entry (producer result or manual insert)
    pub(crate) fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a miss satisfied by another caller's refresh
    pub(crate) fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a producer failure
    pub(crate) fn record_producer_error(&self) {
        self.producer_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record explicitly removed entries
    pub(crate) fn record_invalidations(&self, count: u64) {
        self.invalidations.fetch_add(count, Ordering::Relaxed);
    }

    /// Record an expired entry removed by cleanup
    pub(crate) fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self, size: usize) -> CacheStats {
        CacheStats {
            size,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            producer_errors: self.producer_errors.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
        }
    }
}
