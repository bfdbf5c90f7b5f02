//! Greenwich and local sidereal time.
//!
//! All functions take UT Julian Dates. The engine treats UTC as UT1; the
//! difference stays under 0.9 s by construction of UTC, about 0.004° of
//! sidereal rotation, well below the resolution of house cusps.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle in radians, [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, [0, 2π).
///
/// GMST = ERA + polynomial(T), T in Julian centuries of UT from J2000.0.
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t.powi(2)
        - 0.00000044 * t.powi(3)
        - 0.000029956 * t.powi(4)
        - 0.0000000368 * t.powi(5);
    (earth_rotation_angle_rad(jd_ut) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time in radians for an east-positive longitude in degrees.
///
/// This is also the right ascension of the meridian (RAMC).
pub fn local_sidereal_time_rad(jd_ut: f64, east_longitude_deg: f64) -> f64 {
    (gmst_rad(jd_ut) + east_longitude_deg.to_radians()).rem_euclid(TAU)
}
