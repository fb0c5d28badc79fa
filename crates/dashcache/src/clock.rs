//! Time abstraction for deterministic TTL testing.
//!
//! Freshness is a pure function of elapsed monotonic time, so the cache takes
//! its notion of "now" from a [`Clock`] instead of calling
//! [`Instant::now`] directly. Production code uses [`SystemClock`]; tests use
//! [`MockClock`] to step time forward without sleeping.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Trait for time operations to enable deterministic testing.
pub trait Clock: Send + Sync + 'static {
    /// Get the current instant (monotonic time).
    fn now(&self) -> Instant;
}

/// Real system clock implementation for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient sharing.
impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Mock clock for deterministic testing.
///
/// Allows tests to control time progression without actual delays. Clones
/// share the same elapsed counter, so a test can hold one handle while the
/// cache under test holds another.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock starting at the current instant.
    pub fn new() -> Self {
        Self { start: Instant::now(), elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Advance the mock clock by a duration.
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut elapsed) = self.elapsed.lock() {
            *elapsed += duration;
        }
    }

    /// Advance the mock clock by milliseconds (convenience method).
    ///
    /// Equivalent to `advance(Duration::from_millis(millis))`.
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Set the mock clock to a specific elapsed time.
    pub fn set_elapsed(&self, duration: Duration) {
        if let Ok(mut elapsed) = self.elapsed.lock() {
            *elapsed = duration;
        }
    }

    /// Get the current elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.lock().map(|e| *e).unwrap_or(Duration::ZERO)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let elapsed = self.elapsed.lock().map(|e| *e).unwrap_or(Duration::ZERO);
        self.start + elapsed
    }
}
