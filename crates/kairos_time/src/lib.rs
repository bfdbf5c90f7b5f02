//! Time-scale helpers for the kairos engine.
//!
//! This crate provides:
//! - Julian Date ↔ calendar and `chrono` instant conversions
//! - ΔT (TT − UT) for the 1800–2200 ephemeris window
//! - Greenwich and local sidereal time for house computation

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

use chrono::{DateTime, Utc};

pub use delta_t::{delta_t_seconds, ut_to_tt_jd};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, datetime_from_jd,
    decimal_year, jd_from_datetime, jd_to_calendar, julian_centuries,
};
pub use sidereal::{earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad};

/// An instant expressed on both the UT and TT Julian Date scales.
///
/// The ephemeris consumes `jd_tt`; sidereal time consumes `jd_ut`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianInstant {
    pub jd_ut: f64,
    pub jd_tt: f64,
}

impl JulianInstant {
    /// Build from a UT Julian Date, applying ΔT.
    pub fn from_jd_ut(jd_ut: f64) -> Self {
        Self {
            jd_ut,
            jd_tt: ut_to_tt_jd(jd_ut),
        }
    }

    /// Build from a UTC instant.
    pub fn from_datetime(instant: &DateTime<Utc>) -> Self {
        Self::from_jd_ut(jd_from_datetime(instant))
    }

    /// Shift both scales by a number of days.
    pub fn offset_days(self, days: f64) -> Self {
        Self {
            jd_ut: self.jd_ut + days,
            jd_tt: self.jd_tt + days,
        }
    }
}
