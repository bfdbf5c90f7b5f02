//! Date-range processing on top of [`kairos_search::summarize`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use kairos_core::Engine;
use kairos_search::{ContextConfig, CosmicContext, SearchError, summarize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{CacheKey, ClearOnFullCache, ContextCache};
use crate::error::BatchError;

/// Longest inclusive span accepted by a single range request.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 45;

/// Forward search window for a local noon that falls in a DST gap.
const GAP_SEARCH_MINUTES: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Entries held before the cache is emptied.
    pub cache_capacity: usize,
    pub max_range_days: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be at least 1");
        }
        if self.max_range_days == 0 {
            return Err("max_range_days must be at least 1");
        }
        Ok(())
    }
}

/// Counters for one range request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Contexts computed by this request.
    pub computed: usize,
    /// Dates answered from the cache.
    pub cache_hits: usize,
}

/// Computes cosmic contexts for sets of local dates, memoizing each
/// (date, timezone) pair.
///
/// Safe to share across threads; the engine is immutable and the cache
/// synchronizes internally.
pub struct BatchProcessor {
    engine: Arc<Engine>,
    context: ContextConfig,
    config: BatchConfig,
    cache: Arc<dyn ContextCache>,
}

impl std::fmt::Debug for BatchProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchProcessor")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl BatchProcessor {
    /// Processor backed by a [`ClearOnFullCache`] sized from `config`.
    pub fn new(
        engine: Arc<Engine>,
        context: ContextConfig,
        config: BatchConfig,
    ) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::InvalidConfig)?;
        let cache = Arc::new(ClearOnFullCache::new(config.cache_capacity));
        Self::with_cache(engine, context, config, cache)
    }

    /// Processor backed by a caller-supplied cache.
    pub fn with_cache(
        engine: Arc<Engine>,
        context: ContextConfig,
        config: BatchConfig,
        cache: Arc<dyn ContextCache>,
    ) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::InvalidConfig)?;
        context
            .validate()
            .map_err(|e| BatchError::Search(SearchError::InvalidConfig(e)))?;
        Ok(Self {
            engine,
            context,
            config,
            cache,
        })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<dyn ContextCache> {
        &self.cache
    }

    /// Context for every distinct date in `dates`, keyed by date.
    ///
    /// Each date is evaluated at local noon in `timezone`.
    pub fn compute_range(
        &self,
        dates: &[NaiveDate],
        timezone: &str,
    ) -> Result<BTreeMap<NaiveDate, Arc<CosmicContext>>, BatchError> {
        self.compute_range_with_stats(dates, timezone)
            .map(|(contexts, _)| contexts)
    }

    /// Like [`compute_range`](Self::compute_range) for every date from
    /// `start` to `end` inclusive.
    pub fn compute_span(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        timezone: &str,
    ) -> Result<BTreeMap<NaiveDate, Arc<CosmicContext>>, BatchError> {
        let (first, last) = if start <= end { (start, end) } else { (end, start) };
        let span = (last - first).num_days() + 1;
        if span > i64::from(self.config.max_range_days) {
            return Err(BatchError::RangeTooLarge {
                requested_days: span,
                max_days: self.config.max_range_days,
            });
        }
        let dates: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
        self.compute_range(&dates, timezone)
    }

    pub fn compute_range_with_stats(
        &self,
        dates: &[NaiveDate],
        timezone: &str,
    ) -> Result<(BTreeMap<NaiveDate, Arc<CosmicContext>>, BatchStats), BatchError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| BatchError::InvalidTimezone(timezone.to_string()))?;

        let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        let (Some(&first), Some(&last)) = (distinct.first(), distinct.last()) else {
            return Ok((BTreeMap::new(), BatchStats::default()));
        };
        let span = (last - first).num_days() + 1;
        if span > i64::from(self.config.max_range_days) {
            return Err(BatchError::RangeTooLarge {
                requested_days: span,
                max_days: self.config.max_range_days,
            });
        }

        let mut contexts = BTreeMap::new();
        let mut misses = Vec::new();
        for date in distinct {
            let key = CacheKey { date, timezone: tz };
            match self.cache.get(&key) {
                Some(context) => {
                    contexts.insert(date, context);
                }
                None => misses.push(date),
            }
        }
        let stats = BatchStats {
            computed: misses.len(),
            cache_hits: contexts.len(),
        };

        let computed = misses
            .par_iter()
            .map(|&date| -> Result<(NaiveDate, Arc<CosmicContext>), BatchError> {
                let instant = local_noon(date, tz)?;
                let context = summarize(&self.engine, &instant, &self.context)?;
                Ok((date, Arc::new(context)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (date, context) in computed {
            self.cache.insert(
                CacheKey { date, timezone: tz },
                Arc::clone(&context),
            );
            contexts.insert(date, context);
        }

        if stats.computed > 0 {
            info!(
                %tz, from = %first, to = %last,
                computed = stats.computed, hits = stats.cache_hits,
                "computed context range"
            );
        } else {
            debug!(%tz, from = %first, to = %last, hits = stats.cache_hits, "range served from cache");
        }
        Ok((contexts, stats))
    }
}

/// Instant of local noon on `date` in `tz`.
///
/// An ambiguous noon resolves to the earlier instant; a noon inside a gap
/// moves forward to the first valid minute.
pub fn local_noon(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, BatchError> {
    let noon = NaiveDateTime::new(date, NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    (0..=GAP_SEARCH_MINUTES)
        .find_map(|m| {
            tz.from_local_datetime(&(noon + Duration::minutes(m)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .ok_or(BatchError::UnresolvableLocalTime(date))
}
