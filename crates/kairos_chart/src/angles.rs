//! Ascendant and Midheaven computation.
//!
//! Standard spherical astronomy formulas for the ecliptic longitude of the
//! eastern horizon and the upper meridian, given the local sidereal time.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Chapters 13 and 14.

use std::f64::consts::TAU;

use kairos_frames::mean_obliquity_rad;
use kairos_time::{JulianInstant, julian_centuries, local_sidereal_time_rad};

use crate::location::GeoLocation;

/// Local sidereal quantities shared by the angles and every house cusp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealFrame {
    /// Right ascension of the meridian (= local sidereal time), radians.
    pub ramc_rad: f64,
    /// Mean obliquity of date, radians.
    pub obliquity_rad: f64,
    /// Geographic latitude, radians.
    pub latitude_rad: f64,
}

impl SiderealFrame {
    pub fn at(instant: JulianInstant, location: &GeoLocation) -> Self {
        Self {
            ramc_rad: local_sidereal_time_rad(instant.jd_ut, location.longitude_deg),
            obliquity_rad: mean_obliquity_rad(julian_centuries(instant.jd_tt)),
            latitude_rad: location.latitude_rad(),
        }
    }
}

/// Ecliptic longitude of the Ascendant in radians, [0, 2π).
///
/// `Asc = atan2(cos θ, −(sin θ·cos ε + tan φ·sin ε))`
pub fn ascendant_rad(frame: &SiderealFrame) -> f64 {
    let th = frame.ramc_rad;
    let eps = frame.obliquity_rad;
    f64::atan2(
        th.cos(),
        -(th.sin() * eps.cos() + frame.latitude_rad.tan() * eps.sin()),
    )
    .rem_euclid(TAU)
}

/// Ecliptic longitude of the Midheaven in radians, [0, 2π).
///
/// `MC = atan2(sin θ, cos θ·cos ε)`
pub fn midheaven_rad(frame: &SiderealFrame) -> f64 {
    let th = frame.ramc_rad;
    f64::atan2(th.sin(), th.cos() * frame.obliquity_rad.cos()).rem_euclid(TAU)
}
