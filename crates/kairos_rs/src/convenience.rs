use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use kairos_chart::{BirthData, NatalChart};
use kairos_core::EclipticPosition;
use kairos_search::{CosmicContext, Transit};

use crate::error::KairosError;
use crate::global::kairos;

/// Positions of every tracked body at `instant`.
pub fn positions_at(instant: &DateTime<Utc>) -> Result<Vec<EclipticPosition>, KairosError> {
    kairos()?.positions_at(instant)
}

pub fn compute_chart(birth: &BirthData) -> Result<NatalChart, KairosError> {
    kairos()?.compute_chart(birth)
}

pub fn summarize(instant: &DateTime<Utc>) -> Result<CosmicContext, KairosError> {
    kairos()?.summarize(instant)
}

/// Cached contexts through the global batch processor.
pub fn compute_range(
    dates: &[NaiveDate],
    timezone: &str,
) -> Result<BTreeMap<NaiveDate, Arc<CosmicContext>>, KairosError> {
    kairos()?.compute_range(dates, timezone)
}

pub fn match_transits(
    instant: &DateTime<Utc>,
    natal: &NatalChart,
) -> Result<Vec<Transit>, KairosError> {
    kairos()?.match_transits(instant, natal)
}
