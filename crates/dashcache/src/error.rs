//! Error types for the cache layer.
//!
//! The cache is a transparent pass-through for producer failures: whatever
//! error the producer returns from [`TimedCache::get_with`] reaches the
//! caller unchanged, with no retry, wrapping, or suppression. The only errors
//! minted here are the ones the cache layer itself can detect.
//!
//! [`TimedCache::get_with`]: crate::cache::TimedCache::get_with

use thiserror::Error;

/// Errors produced by the cache layer itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A query key was empty or contained only whitespace.
    ///
    /// Caching under an empty key would silently collide every such caller on
    /// one entry, so key construction rejects it up front.
    #[error("query key must not be empty")]
    EmptyKey,
}
