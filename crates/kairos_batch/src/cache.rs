//! Memoization of computed contexts.
//!
//! [`ContextCache`] is the seam the batch processor talks to;
//! [`ClearOnFullCache`] is the default store. It never evicts single
//! entries: once it holds `capacity` entries the next new key empties it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use kairos_search::CosmicContext;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

/// Cache key: a calendar date interpreted in a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    pub date: NaiveDate,
    pub timezone: Tz,
}

/// Thread-safe store of computed contexts.
pub trait ContextCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Arc<CosmicContext>>;
    fn insert(&self, key: CacheKey, context: Arc<CosmicContext>);
    fn len(&self) -> usize;
    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<CacheKey, Arc<CosmicContext>>,
    clears: u64,
}

/// Append-only cache that is emptied wholesale when full.
#[derive(Debug)]
pub struct ClearOnFullCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl ClearOnFullCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of times the cache has been emptied because it was full.
    pub fn clear_count(&self) -> u64 {
        self.inner.lock().clears
    }
}

impl ContextCache for ClearOnFullCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<CosmicContext>> {
        self.inner.lock().entries.get(key).cloned()
    }

    fn insert(&self, key: CacheKey, context: Arc<CosmicContext>) {
        let mut inner = self.inner.lock();
        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            info!(capacity = self.capacity, "context cache full, clearing");
            inner.entries.clear();
            inner.clears += 1;
        }
        inner.entries.insert(key, context);
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use kairos_search::{MoonPhase, MoonPhaseName};

    fn context() -> Arc<CosmicContext> {
        Arc::new(CosmicContext {
            instant: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            placements: Vec::new(),
            moon_phase: MoonPhase {
                name: MoonPhaseName::New,
                elongation_deg: 0.0,
                illumination: 0.0,
                age_days: 0.0,
                waxing: true,
            },
            next_sign_transitions: BTreeMap::new(),
            tight_aspects: Vec::new(),
        })
    }

    fn key(day: u32) -> CacheKey {
        CacheKey {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            timezone: chrono_tz::UTC,
        }
    }

    #[test]
    fn get_after_insert() {
        let cache = ClearOnFullCache::new(4);
        assert!(cache.is_empty());
        cache.insert(key(1), context());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clears_when_full() {
        let cache = ClearOnFullCache::new(3);
        for d in 1..=3 {
            cache.insert(key(d), context());
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.clear_count(), 0);

        cache.insert(key(4), context());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.clear_count(), 1);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(4)).is_some());
    }

    #[test]
    fn reinserting_existing_key_does_not_clear() {
        let cache = ClearOnFullCache::new(2);
        cache.insert(key(1), context());
        cache.insert(key(2), context());
        cache.insert(key(2), context());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.clear_count(), 0);
    }

    #[test]
    fn timezone_is_part_of_the_key() {
        let cache = ClearOnFullCache::new(8);
        cache.insert(key(1), context());
        let other = CacheKey {
            timezone: chrono_tz::Asia::Tokyo,
            ..key(1)
        };
        assert!(cache.get(&other).is_none());
    }

    #[test]
    fn zero_capacity_behaves_as_one() {
        let cache = ClearOnFullCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(key(1), context());
        cache.insert(key(2), context());
        assert_eq!(cache.len(), 1);
    }
}
