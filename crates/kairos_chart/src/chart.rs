//! Natal chart assembly.

use chrono::{DateTime, Utc};
use kairos_core::{Body, EclipticPosition, Engine};
use kairos_time::{JulianInstant, datetime_from_jd, jd_from_datetime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::angles::SiderealFrame;
use crate::error::ChartError;
use crate::houses::{HouseCusps, MAX_HOUSE_LATITUDE_DEG, compute_houses};
use crate::location::GeoLocation;
use crate::zodiac::{ZodiacPlacement, zodiac_placement};

/// One body's position in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPlacement {
    pub position: EclipticPosition,
    pub zodiac: ZodiacPlacement,
}

impl ChartPlacement {
    pub fn from_position(position: EclipticPosition) -> Self {
        Self {
            position,
            zodiac: zodiac_placement(position.longitude_deg),
        }
    }

    pub fn body(&self) -> Body {
        self.position.body
    }

    pub fn longitude_deg(&self) -> f64 {
        self.position.longitude_deg
    }
}

/// Snapshot of the sky at birth.
///
/// `houses` is `None` exactly when `has_exact_time` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub birth_instant: DateTime<Utc>,
    /// Instant the positions were computed for. Equals `birth_instant` for an
    /// exact time, otherwise local mean noon of the birth date.
    pub chart_instant: DateTime<Utc>,
    pub location: GeoLocation,
    pub has_exact_time: bool,
    pub placements: Vec<ChartPlacement>,
    pub houses: Option<HouseCusps>,
}

impl NatalChart {
    pub fn placement(&self, body: Body) -> Option<&ChartPlacement> {
        self.placements.iter().find(|p| p.body() == body)
    }

    /// House cusps and angles, or `IncompleteBirthData` without a birth time.
    pub fn require_houses(&self) -> Result<&HouseCusps, ChartError> {
        self.houses.as_ref().ok_or(ChartError::IncompleteBirthData(
            "houses and angles require an exact birth time",
        ))
    }

    pub fn ascendant_deg(&self) -> Result<f64, ChartError> {
        self.require_houses().map(|h| h.ascendant_deg)
    }

    pub fn midheaven_deg(&self) -> Result<f64, ChartError> {
        self.require_houses().map(|h| h.midheaven_deg)
    }

    /// House a body falls in. `None` without houses or for an untracked body.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        let houses = self.houses.as_ref()?;
        let placement = self.placement(body)?;
        Some(houses.house_of(placement.longitude_deg()))
    }
}

/// UT Julian Date of local mean noon on the local-mean-time calendar date
/// containing `jd_ut`.
pub fn local_mean_noon_jd(jd_ut: f64, longitude_deg: f64) -> f64 {
    let offset = longitude_deg / 360.0;
    let local_midnight = (jd_ut + offset + 0.5).floor() - 0.5;
    local_midnight + 0.5 - offset
}

/// Compute a natal chart.
///
/// With `has_exact_time` the chart carries Placidus house cusps and angles
/// for `birth_instant`. Without it, positions are taken at local mean noon of
/// the birth date and no houses are produced.
pub fn compute_chart(
    engine: &Engine,
    birth_instant: &DateTime<Utc>,
    location: &GeoLocation,
    has_exact_time: bool,
) -> Result<NatalChart, ChartError> {
    location.validate()?;
    if has_exact_time && location.latitude_deg.abs() > MAX_HOUSE_LATITUDE_DEG {
        return Err(ChartError::InvalidLocation(
            "house cusps are undefined beyond 66.5 degrees latitude",
        ));
    }

    let birth_jd = jd_from_datetime(birth_instant);
    let (chart_jd, chart_instant) = if has_exact_time {
        (birth_jd, *birth_instant)
    } else {
        let noon = local_mean_noon_jd(birth_jd, location.longitude_deg);
        (noon, datetime_from_jd(noon)?)
    };

    let placements = engine
        .positions_at_jd(chart_jd)?
        .into_iter()
        .map(ChartPlacement::from_position)
        .collect();

    let houses = if has_exact_time {
        let frame = SiderealFrame::at(JulianInstant::from_jd_ut(chart_jd), location);
        Some(compute_houses(&frame)?)
    } else {
        None
    };

    debug!(
        %chart_instant,
        lat = location.latitude_deg,
        lon = location.longitude_deg,
        has_exact_time,
        "computed natal chart"
    );

    Ok(NatalChart {
        birth_instant: *birth_instant,
        chart_instant,
        location: *location,
        has_exact_time,
        placements,
        houses,
    })
}
