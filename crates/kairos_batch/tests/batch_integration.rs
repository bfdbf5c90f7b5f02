//! Range processing against the real engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, TimeZone, Utc};
use kairos_batch::{
    BatchConfig, BatchError, BatchProcessor, CacheKey, ClearOnFullCache, ContextCache,
};
use kairos_core::{Body, Engine, EngineConfig};
use kairos_search::{ContextConfig, CosmicContext, SearchError};

fn engine() -> Arc<Engine> {
    Arc::new(Engine::new(EngineConfig::default()).unwrap())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Counts inserts on top of a clear-on-full store.
struct CountingCache {
    inner: ClearOnFullCache,
    inserts: AtomicUsize,
}

impl ContextCache for CountingCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<CosmicContext>> {
        self.inner.get(key)
    }
    fn insert(&self, key: CacheKey, context: Arc<CosmicContext>) {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(key, context);
    }
    fn len(&self) -> usize {
        self.inner.len()
    }
    fn clear(&self) {
        self.inner.clear();
    }
}

#[test]
fn second_request_is_served_from_cache() {
    let cache = Arc::new(CountingCache {
        inner: ClearOnFullCache::new(64),
        inserts: AtomicUsize::new(0),
    });
    let p = BatchProcessor::with_cache(
        engine(),
        ContextConfig::default(),
        BatchConfig::default(),
        cache.clone(),
    )
    .unwrap();
    let dates: Vec<_> = (1..=7).map(|d| day(2024, 5, d)).collect();

    let (first, stats) = p.compute_range_with_stats(&dates, "Europe/London").unwrap();
    assert_eq!(first.len(), 7);
    assert_eq!(stats.computed, 7);
    assert_eq!(stats.cache_hits, 0);
    assert_eq!(cache.inserts.load(Ordering::SeqCst), 7);

    let (second, stats) = p.compute_range_with_stats(&dates, "Europe/London").unwrap();
    assert_eq!(stats.computed, 0);
    assert_eq!(stats.cache_hits, 7);
    assert_eq!(cache.inserts.load(Ordering::SeqCst), 7);
    for (date, ctx) in &second {
        assert!(Arc::ptr_eq(ctx, &first[date]));
    }
}

#[test]
fn duplicates_are_computed_once() {
    let p = BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default())
        .unwrap();
    let dates = [
        day(2024, 3, 20),
        day(2024, 3, 18),
        day(2024, 3, 20),
        day(2024, 3, 18),
    ];
    let (out, stats) = p.compute_range_with_stats(&dates, "UTC").unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(stats.computed, 2);
    let keys: Vec<_> = out.keys().copied().collect();
    assert_eq!(keys, vec![day(2024, 3, 18), day(2024, 3, 20)]);
}

#[test]
fn contexts_are_evaluated_at_local_noon() {
    let p = BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default())
        .unwrap();
    let out = p.compute_range(&[day(2024, 1, 10)], "Asia/Tokyo").unwrap();
    let ctx = &out[&day(2024, 1, 10)];
    assert_eq!(ctx.instant, Utc.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap());
    assert_eq!(ctx.placements.len(), Body::ALL.len());
}

#[test]
fn timezones_are_cached_separately() {
    let p = BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default())
        .unwrap();
    let dates = [day(2024, 6, 1)];
    p.compute_range(&dates, "UTC").unwrap();
    let (_, stats) = p
        .compute_range_with_stats(&dates, "America/Los_Angeles")
        .unwrap();
    assert_eq!(stats.computed, 1);
    assert_eq!(p.cache().len(), 2);
}

#[test]
fn small_cache_clears_when_full() {
    let p = BatchProcessor::new(
        engine(),
        ContextConfig::default(),
        BatchConfig {
            cache_capacity: 3,
            ..BatchConfig::default()
        },
    )
    .unwrap();
    let dates: Vec<_> = (1..=5).map(|d| day(2024, 9, d)).collect();
    let out = p.compute_range(&dates, "UTC").unwrap();
    assert_eq!(out.len(), 5);
    // Three fill the cache, the fourth empties it, the fifth joins it.
    assert_eq!(p.cache().len(), 2);
}

#[test]
fn fifty_day_range_is_rejected() {
    let p = BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default())
        .unwrap();
    let dates: Vec<_> = day(2024, 1, 1).iter_days().take(50).collect();
    assert_eq!(
        p.compute_range(&dates, "UTC").unwrap_err(),
        BatchError::RangeTooLarge {
            requested_days: 50,
            max_days: 45
        }
    );
    assert!(p.cache().is_empty());
}

#[test]
fn out_of_range_date_propagates_engine_error() {
    let p = BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default())
        .unwrap();
    let err = p.compute_range(&[day(1700, 1, 1)], "UTC").unwrap_err();
    assert!(matches!(err, BatchError::Search(SearchError::Engine(_))));
}

#[test]
fn shared_across_threads() {
    let p = Arc::new(
        BatchProcessor::new(engine(), ContextConfig::default(), BatchConfig::default()).unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let p = Arc::clone(&p);
            std::thread::spawn(move || {
                let dates: Vec<_> = (1..=3).map(|d| day(2024, 10, d + i)).collect();
                p.compute_range(&dates, "UTC").unwrap().len()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 3);
    }
    assert_eq!(p.cache().len(), 6);
}
