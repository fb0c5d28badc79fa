//! Validated query keys for dashboard cache entries.
//!
//! Dashboard services key their cached aggregates by opaque strings such as
//! `"admin-stats"` or `"user-growth-7d"` (one key per logical query and
//! parameter combination). [`QueryKey`] is the validated form of such a key:
//! construction rejects empty and whitespace-only strings so nothing can be
//! cached under a falsy key by accident.
//!
//! The cache itself stays generic over any `Eq + Hash + Clone` key type;
//! `QueryKey` is the type dashboard callers are expected to use.

use std::fmt;

use crate::error::CacheError;

/// Opaque, non-empty identifier for a cached dashboard query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    /// Create a query key, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::EmptyKey`] if the key has no non-whitespace
    /// characters.
    ///
    /// # Example
    /// ```
    /// use dashcache::QueryKey;
    ///
    /// let key = QueryKey::new("revenue-monthly")?;
    /// assert_eq!(key.as_str(), "revenue-monthly");
    ///
    /// assert!(QueryKey::new("   ").is_err());
    /// # Ok::<(), dashcache::CacheError>(())
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, CacheError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CacheError::EmptyKey);
        }
        Ok(Self(key))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QueryKey> for String {
    fn from(key: QueryKey) -> Self {
        key.0
    }
}

impl AsRef<str> for QueryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
