//! Integration tests for ComputeCache
//!
//! Tests compute-if-absent semantics, statistics, and shared identity.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use mapline_foundation::{ComputeCache, Error};

// =============================================================================
// Compute If Absent
// =============================================================================

#[test]
fn computes_once_per_key() {
    let cache: ComputeCache<String, Arc<String>> = ComputeCache::new();
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let value = cache.get_or_insert_with("person".to_string(), |key| {
            calls.fetch_add(1, Ordering::SeqCst);
            Arc::new(key.to_uppercase())
        });
        assert_eq!(value.as_str(), "PERSON");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn failed_computation_is_not_stored() {
    let cache: ComputeCache<u32, Arc<u32>> = ComputeCache::new();
    let result = cache.get_or_try_insert_with(1, |_| Err(Error::invalid_argument("nope")));
    assert!(result.is_err());
    assert!(!cache.contains(&1));

    let value = cache
        .get_or_try_insert_with(1, |k| Ok::<_, Error>(Arc::new(k + 1)))
        .unwrap();
    assert_eq!(*value, 2);
    assert!(cache.contains(&1));
}

#[test]
fn stats_and_clear() {
    let cache: ComputeCache<u32, u32> = ComputeCache::new();
    assert!(cache.is_empty());
    cache.get_or_insert_with(1, |k| k * 10);
    cache.get_or_insert_with(1, |k| k * 10);
    assert_eq!(cache.get(&1), Some(10));
    assert_eq!(cache.get(&2), None);

    let stats = cache.stats();
    assert_eq!(stats.size, 1);
    assert!(stats.hits >= 2);
    assert!(stats.hit_rate() > 0.0);

    cache.clear();
    assert!(cache.is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_callers_share_one_value() {
    let cache: Arc<ComputeCache<&'static str, Arc<Vec<u8>>>> = Arc::new(ComputeCache::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                cache.get_or_insert_with("key", |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(vec![1, 2, 3])
                })
            })
        })
        .collect();
    let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
