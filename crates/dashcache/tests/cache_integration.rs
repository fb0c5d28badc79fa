//! Integration tests for the read-through cache
//!
//! Exercises the freshness window, error pass-through, explicit
//! invalidation, key and instance isolation, and refresh coalescing through
//! the public API, with `MockClock` driving TTL behavior deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashcache::{CacheConfig, MockClock, QueryKey, TimedCache};

fn cache_with_clock(ttl: Duration) -> (TimedCache<String, i32, MockClock>, MockClock) {
    let clock = MockClock::new();
    let cache = TimedCache::with_clock(CacheConfig::new(ttl), clock.clone());
    (cache, clock)
}

/// Verifies the freshness window end to end: reads inside the TTL serve the
/// stored value without invoking the new producer, reads at or past the TTL
/// refresh.
///
/// # Test Steps
/// 1. Populate "x" at t=0 with value 1
/// 2. Read at t = TTL - 1ms with a producer returning 2; expect 1, no call
/// 3. Read at t = TTL with a producer returning 3; expect 3, one call
#[tokio::test]
async fn test_freshness_boundary() {
    let (cache, clock) = cache_with_clock(Duration::from_secs(60));

    cache.get_with("x".to_string(), || async { Ok::<_, String>(1) }).await.unwrap();

    clock.advance(Duration::from_secs(60) - Duration::from_millis(1));
    let within_ttl = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&within_ttl);
    let value = cache
        .get_with("x".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(2)
        })
        .await
        .unwrap();
    assert_eq!(value, 1);
    assert_eq!(within_ttl.load(Ordering::SeqCst), 0);

    clock.advance_millis(1);
    let at_ttl = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&at_ttl);
    let value = cache
        .get_with("x".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(3)
        })
        .await
        .unwrap();
    assert_eq!(value, 3);
    assert_eq!(at_ttl.load(Ordering::SeqCst), 1);
}

/// Verifies that a miss stores exactly one entry carrying the producer's
/// resolved value.
#[tokio::test]
async fn test_miss_stores_exactly_one_entry() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60));

    let value = cache
        .get_with("admin-stats".to_string(), || async { Ok::<_, String>(412) })
        .await
        .unwrap();

    assert_eq!(value, 412);
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.peek(&"admin-stats".to_string()).await, Some(412));
}

/// Verifies that a producer failure with no prior entry leaves the cache
/// empty and that a subsequent read behaves as a clean miss.
#[tokio::test]
async fn test_error_on_empty_cache_does_not_poison() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60));

    let failed = cache
        .get_with("x".to_string(), || async { Err::<i32, _>("connection refused".to_string()) })
        .await;
    assert_eq!(failed, Err("connection refused".to_string()));
    assert!(cache.is_empty().await);

    let recovered =
        cache.get_with("x".to_string(), || async { Ok::<_, String>(5) }).await.unwrap();
    assert_eq!(recovered, 5);
}

/// Verifies that a failed refresh of a stale entry neither deletes nor
/// overwrites it: the entry stays in place, still subject to its original
/// staleness clock.
///
/// # Test Steps
/// 1. Populate "x" with 1, advance past the TTL
/// 2. Attempt a refresh whose producer fails; expect the error through
/// 3. Confirm the stale entry is still stored
/// 4. Refresh successfully and confirm the new value is served
#[tokio::test]
async fn test_failed_refresh_preserves_stale_entry() {
    let (cache, clock) = cache_with_clock(Duration::from_secs(60));

    cache.get_with("x".to_string(), || async { Ok::<_, String>(1) }).await.unwrap();
    clock.advance(Duration::from_secs(90));

    let failed =
        cache.get_with("x".to_string(), || async { Err::<i32, _>("timeout".to_string()) }).await;
    assert_eq!(failed, Err("timeout".to_string()));
    assert_eq!(cache.len().await, 1);

    let refreshed =
        cache.get_with("x".to_string(), || async { Ok::<_, String>(2) }).await.unwrap();
    assert_eq!(refreshed, 2);
}

/// Verifies explicit invalidation: after `remove` the next read must invoke
/// its producer regardless of freshness, and `clear` does the same for all
/// keys at once.
#[tokio::test]
async fn test_explicit_invalidation_forces_refresh() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60));

    cache.get_with("a".to_string(), || async { Ok::<_, String>(1) }).await.unwrap();
    cache.get_with("b".to_string(), || async { Ok::<_, String>(2) }).await.unwrap();

    cache.remove(&"a".to_string()).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let value = cache
        .get_with("a".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(10)
        })
        .await
        .unwrap();
    assert_eq!(value, 10);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    cache.clear().await;
    assert!(cache.is_empty().await);
    let value = cache.get_with("b".to_string(), || async { Ok::<_, String>(20) }).await.unwrap();
    assert_eq!(value, 20);
}

/// Verifies that entries for different keys never share or overwrite each
/// other.
#[tokio::test]
async fn test_key_isolation() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60));

    cache.get_with("a".to_string(), || async { Ok::<_, String>(1) }).await.unwrap();
    cache.get_with("b".to_string(), || async { Ok::<_, String>(2) }).await.unwrap();

    assert_eq!(cache.peek(&"a".to_string()).await, Some(1));
    assert_eq!(cache.peek(&"b".to_string()).await, Some(2));

    cache.remove(&"a".to_string()).await;
    assert_eq!(cache.peek(&"b".to_string()).await, Some(2));
}

/// Verifies that two distinct cache instances with identical TTLs never
/// share entries, even for identical key strings.
#[tokio::test]
async fn test_instance_isolation() {
    let (admin, _clock_a) = cache_with_clock(Duration::from_secs(60));
    let (revenue, _clock_b) = cache_with_clock(Duration::from_secs(60));

    admin.insert("totals".to_string(), 1).await;
    revenue.insert("totals".to_string(), 2).await;

    assert_eq!(admin.peek(&"totals".to_string()).await, Some(1));
    assert_eq!(revenue.peek(&"totals".to_string()).await, Some(2));

    admin.clear().await;
    assert_eq!(revenue.peek(&"totals".to_string()).await, Some(2));
}

/// Verifies refresh coalescing: concurrent misses for one key share a single
/// producer call and both callers observe the produced value.
///
/// # Test Steps
/// 1. Spawn two readers for the same absent key; the producer sleeps so the
///    calls overlap
/// 2. Both readers must resolve to the produced value
/// 3. The producer must have run exactly once
#[tokio::test]
async fn test_concurrent_misses_share_one_producer_call() {
    let config =
        CacheConfig::builder().ttl(Duration::from_secs(60)).track_metrics(true).build();
    let cache: TimedCache<String, i32> = TimedCache::new(config);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut readers = Vec::new();
    for _ in 0..2 {
        let cache = cache.clone();
        let calls = Arc::clone(&calls);
        readers.push(tokio::spawn(async move {
            cache
                .get_with("admin-stats".to_string(), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<_, String>(7)
                })
                .await
        }));
    }

    for reader in readers {
        assert_eq!(reader.await.unwrap(), Ok(7));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // One reader refreshed; the other was served either by waiting on the
    // in-flight refresh or by an ordinary hit after it completed.
    let stats = cache.stats();
    assert_eq!(stats.refreshes, 1);
    assert_eq!(stats.hits + stats.coalesced, 1);
}

/// Verifies the literal scenario from the design discussion with a 2000 ms
/// TTL.
///
/// # Test Steps
/// 1. t=0: read "x" producing 1; expect 1
/// 2. t=1000: read with a producer returning 2; expect 1 (still fresh)
/// 3. t=2500: read producing 3; expect 3 (stale, refreshed)
/// 4. t=2600: remove "x", then read producing 4; expect 4 despite being well
///    inside the previous freshness window
#[tokio::test]
async fn test_two_second_ttl_scenario() {
    let (cache, clock) = cache_with_clock(Duration::from_millis(2000));

    let v = cache.get_with("x".to_string(), || async { Ok::<_, String>(1) }).await.unwrap();
    assert_eq!(v, 1);

    clock.advance_millis(1000);
    let v = cache.get_with("x".to_string(), || async { Ok::<_, String>(2) }).await.unwrap();
    assert_eq!(v, 1);

    clock.advance_millis(1500);
    let v = cache.get_with("x".to_string(), || async { Ok::<_, String>(3) }).await.unwrap();
    assert_eq!(v, 3);

    clock.advance_millis(100);
    cache.remove(&"x".to_string()).await;
    let v = cache.get_with("x".to_string(), || async { Ok::<_, String>(4) }).await.unwrap();
    assert_eq!(v, 4);
}

/// Verifies the intended end-to-end wiring: validated query keys in front of
/// a shared cache handle, with metrics tracking the traffic.
#[tokio::test]
async fn test_query_key_round_trip_with_stats() {
    let config =
        CacheConfig::builder().ttl(Duration::from_secs(60)).track_metrics(true).build();
    let cache: TimedCache<QueryKey, u64> = TimedCache::new(config);

    let key = QueryKey::new("user-growth-7d").unwrap();
    let grown = cache.get_with(key.clone(), || async { Ok::<_, String>(31) }).await.unwrap();
    assert_eq!(grown, 31);

    let cached = cache
        .get_with(key.clone(), || async { Err::<u64, _>("should not run".to_string()) })
        .await
        .unwrap();
    assert_eq!(cached, 31);

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.refreshes, 1);
    assert_eq!(stats.size, 1);
}
