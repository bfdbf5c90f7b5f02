//! Ephemeris engine for the kairos computation core.
//!
//! This crate provides the primary [`Engine`], which turns a UTC instant into
//! geocentric tropical ecliptic longitudes for the Sun, Moon and planets,
//! together with their daily motion and retrograde flag.

mod elements;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kairos_frames::{normalize_360, normalize_pm180};
use kairos_time::{JulianInstant, jd_from_datetime, ut_to_tt_jd};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// First supported instant: 1800-01-01T00:00Z (inclusive).
pub const VALIDITY_START_JD: f64 = 2_378_496.5;
/// End of the supported window: 2201-01-01T00:00Z (exclusive).
pub const VALIDITY_END_JD: f64 = 2_524_958.5;

/// Bodies tracked by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every body in canonical output order.
    pub const ALL: [Body; 9] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Uranus and Neptune, which an [`EngineConfig`] may leave out.
    pub const fn is_outer(self) -> bool {
        matches!(self, Self::Uranus | Self::Neptune)
    }

    /// Sun and Moon never show apparent retrograde motion.
    pub const fn is_luminary(self) -> bool {
        matches!(self, Self::Sun | Self::Moon)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(EngineError::UnknownBody)
    }
}

/// Position of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    pub body: Body,
    /// Geocentric tropical longitude, degrees in [0, 360).
    pub longitude_deg: f64,
    /// Signed rate of change of longitude, degrees per day.
    pub speed_deg_per_day: f64,
    pub retrograde: bool,
}

impl EclipticPosition {
    /// Normalizes the longitude and derives the retrograde flag from speed.
    pub fn new(body: Body, longitude_deg: f64, speed_deg_per_day: f64) -> Self {
        Self {
            body,
            longitude_deg: normalize_360(longitude_deg),
            speed_deg_per_day,
            retrograde: speed_deg_per_day < 0.0,
        }
    }
}

/// Engine configuration used at startup time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Track Uranus and Neptune in addition to the classical bodies.
    pub include_outer_bodies: bool,
    /// Half-width of the symmetric difference used for speed, in hours.
    pub speed_step_hours: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            include_outer_bodies: true,
            speed_step_hours: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.speed_step_hours.is_finite() || self.speed_step_hours <= 0.0 {
            return Err("speed_step_hours must be positive and finite");
        }
        if self.speed_step_hours > 24.0 {
            return Err("speed_step_hours must not exceed 24");
        }
        Ok(())
    }
}

/// Errors from engine construction and evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid engine config: {0}")]
    InvalidConfig(&'static str),
    #[error("instant JD {jd_ut} (UT) outside supported range 1800-01-01..2201-01-01")]
    OutOfRangeInstant { jd_ut: f64 },
    #[error("invalid instant: {0}")]
    InvalidInstant(&'static str),
    #[error("unknown body name")]
    UnknownBody,
}

/// Analytic ephemeris engine.
///
/// `Engine` holds only its configuration, so it is [`Send`] + [`Sync`] and
/// can be shared across threads via `Arc<Engine>`. Every query is a pure
/// function of its inputs.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    bodies: Vec<Body>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let bodies = Body::ALL
            .into_iter()
            .filter(|b| config.include_outer_bodies || !b.is_outer())
            .collect();
        Ok(Self { config, bodies })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tracked bodies in output order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Whether `jd_ut` lies inside the supported window.
    pub fn supports_jd(jd_ut: f64) -> bool {
        (VALIDITY_START_JD..VALIDITY_END_JD).contains(&jd_ut)
    }

    fn check_jd(jd_ut: f64) -> Result<(), EngineError> {
        if !jd_ut.is_finite() {
            return Err(EngineError::InvalidInstant("julian date is not finite"));
        }
        if !Self::supports_jd(jd_ut) {
            return Err(EngineError::OutOfRangeInstant { jd_ut });
        }
        Ok(())
    }

    /// Positions of every tracked body at `instant`.
    pub fn positions_at(
        &self,
        instant: &DateTime<Utc>,
    ) -> Result<Vec<EclipticPosition>, EngineError> {
        self.positions_at_jd(jd_from_datetime(instant))
    }

    /// Positions of every tracked body at a UT Julian Date.
    pub fn positions_at_jd(&self, jd_ut: f64) -> Result<Vec<EclipticPosition>, EngineError> {
        Self::check_jd(jd_ut)?;
        let instant = JulianInstant::from_jd_ut(jd_ut);
        let positions: Vec<_> = self
            .bodies
            .iter()
            .map(|&body| self.evaluate(body, instant))
            .collect();
        trace!(jd_ut, count = positions.len(), "evaluated positions");
        Ok(positions)
    }

    /// Position of a single body at `instant`. Works for any [`Body`],
    /// including outer bodies the configuration does not track.
    pub fn position_of(
        &self,
        body: Body,
        instant: &DateTime<Utc>,
    ) -> Result<EclipticPosition, EngineError> {
        self.position_at_jd(body, jd_from_datetime(instant))
    }

    pub fn position_at_jd(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EngineError> {
        Self::check_jd(jd_ut)?;
        Ok(self.evaluate(body, JulianInstant::from_jd_ut(jd_ut)))
    }

    /// Longitude only, without the speed samples. Used by searches that
    /// evaluate many instants.
    pub fn longitude_at_jd(&self, body: Body, jd_ut: f64) -> Result<f64, EngineError> {
        Self::check_jd(jd_ut)?;
        Ok(elements::geocentric_longitude_deg(body, ut_to_tt_jd(jd_ut)))
    }

    fn evaluate(&self, body: Body, instant: JulianInstant) -> EclipticPosition {
        let h = self.config.speed_step_hours / 24.0;
        let lon = elements::geocentric_longitude_deg(body, instant.jd_tt);
        let before = elements::geocentric_longitude_deg(body, instant.jd_tt - h);
        let after = elements::geocentric_longitude_deg(body, instant.jd_tt + h);
        let speed = normalize_pm180(after - before) / (2.0 * h);
        EclipticPosition::new(body, lon, speed)
    }
}
