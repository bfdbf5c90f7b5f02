use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use kairos_batch::{BatchProcessor, BatchStats};
use kairos_chart::{BirthData, GeoLocation, NatalChart};
use kairos_config::KairosConfig;
use kairos_core::{EclipticPosition, Engine};
use kairos_search::{CosmicContext, Transit};
use tracing::debug;

use crate::error::KairosError;

/// One configured instance of every component, sharing a single engine.
///
/// `Kairos` is `Send + Sync`; wrap it in an `Arc` to share it.
#[derive(Debug)]
pub struct Kairos {
    config: KairosConfig,
    engine: Arc<Engine>,
    batch: BatchProcessor,
}

impl Kairos {
    /// Validate `config` and build the engine and batch processor.
    pub fn new(config: KairosConfig) -> Result<Self, KairosError> {
        config.validate()?;
        let engine = Arc::new(Engine::new(config.engine)?);
        let batch = BatchProcessor::new(Arc::clone(&engine), config.context, config.batch)?;
        debug!(bodies = engine.bodies().len(), "kairos ready");
        Ok(Self {
            config,
            engine,
            batch,
        })
    }

    /// Configuration from `KAIROS_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self, KairosError> {
        Self::new(KairosConfig::from_env()?)
    }

    pub fn config(&self) -> &KairosConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn batch(&self) -> &BatchProcessor {
        &self.batch
    }

    pub fn positions_at(
        &self,
        instant: &DateTime<Utc>,
    ) -> Result<Vec<EclipticPosition>, KairosError> {
        Ok(self.engine.positions_at(instant)?)
    }

    /// Natal chart from civil birth data. Houses and angles are present only
    /// when the birth time is known.
    pub fn compute_chart(&self, birth: &BirthData) -> Result<NatalChart, KairosError> {
        Ok(birth.compute_chart(&self.engine)?)
    }

    /// Natal chart for a known UTC instant.
    pub fn compute_chart_at(
        &self,
        instant: &DateTime<Utc>,
        location: &GeoLocation,
        has_exact_time: bool,
    ) -> Result<NatalChart, KairosError> {
        Ok(kairos_chart::compute_chart(
            &self.engine,
            instant,
            location,
            has_exact_time,
        )?)
    }

    /// Cosmic context at `instant`. Uncached; see [`compute_range`](Self::compute_range).
    pub fn summarize(&self, instant: &DateTime<Utc>) -> Result<CosmicContext, KairosError> {
        Ok(kairos_search::summarize(
            &self.engine,
            instant,
            &self.config.context,
        )?)
    }

    /// Cached contexts at local noon for each distinct date.
    pub fn compute_range(
        &self,
        dates: &[NaiveDate],
        timezone: &str,
    ) -> Result<BTreeMap<NaiveDate, Arc<CosmicContext>>, KairosError> {
        Ok(self.batch.compute_range(dates, timezone)?)
    }

    pub fn compute_range_with_stats(
        &self,
        dates: &[NaiveDate],
        timezone: &str,
    ) -> Result<(BTreeMap<NaiveDate, Arc<CosmicContext>>, BatchStats), KairosError> {
        Ok(self.batch.compute_range_with_stats(dates, timezone)?)
    }

    pub fn compute_span(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        timezone: &str,
    ) -> Result<BTreeMap<NaiveDate, Arc<CosmicContext>>, KairosError> {
        Ok(self.batch.compute_span(start, end, timezone)?)
    }

    /// Transits at `instant` against `natal`, using the configured orbs.
    pub fn match_transits(
        &self,
        instant: &DateTime<Utc>,
        natal: &NatalChart,
    ) -> Result<Vec<Transit>, KairosError> {
        let current = self.engine.positions_at(instant)?;
        Ok(self.match_positions(&current, *instant, natal))
    }

    /// Transits for already computed positions.
    pub fn match_positions(
        &self,
        current: &[EclipticPosition],
        evaluated_at: DateTime<Utc>,
        natal: &NatalChart,
    ) -> Vec<Transit> {
        kairos_search::match_transits(current, evaluated_at, natal, &self.config.context.orbs)
    }

    pub fn filter_significant(&self, transits: &[Transit], max_orb_deg: f64) -> Vec<Transit> {
        kairos_search::filter_significant(transits, max_orb_deg)
    }
}
