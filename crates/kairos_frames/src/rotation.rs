//! Conversions between ecliptic longitude and equatorial coordinates for
//! points lying on the ecliptic (latitude zero), as used by house systems.

use std::f64::consts::TAU;

/// Right ascension (radians, [0, 2π)) of an ecliptic point.
///
/// `tan(RA) = tan(λ) · cos(ε)`
pub fn ecliptic_to_right_ascension_rad(lon_rad: f64, eps_rad: f64) -> f64 {
    f64::atan2(lon_rad.sin() * eps_rad.cos(), lon_rad.cos()).rem_euclid(TAU)
}

/// Declination (radians) of an ecliptic point.
///
/// `sin(δ) = sin(ε) · sin(λ)`
pub fn ecliptic_declination_rad(lon_rad: f64, eps_rad: f64) -> f64 {
    (eps_rad.sin() * lon_rad.sin()).asin()
}

/// Ecliptic longitude (radians, [0, 2π)) of the ecliptic point with the
/// given right ascension.
///
/// `tan(λ) = tan(RA) / cos(ε)`
pub fn right_ascension_to_ecliptic_rad(ra_rad: f64, eps_rad: f64) -> f64 {
    f64::atan2(ra_rad.sin(), ra_rad.cos() * eps_rad.cos()).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 0.409_092_8;

    #[test]
    fn equinox_and_solstice_points() {
        assert!(ecliptic_to_right_ascension_rad(0.0, EPS).abs() < 1e-12);
        assert!((ecliptic_to_right_ascension_rad(PI / 2.0, EPS) - PI / 2.0).abs() < 1e-12);
        assert!((ecliptic_to_right_ascension_rad(PI, EPS) - PI).abs() < 1e-12);
    }

    #[test]
    fn roundtrip() {
        for i in 0..36 {
            let lon = (i as f64 * 10.0 + 3.0).to_radians();
            let ra = ecliptic_to_right_ascension_rad(lon, EPS);
            let back = right_ascension_to_ecliptic_rad(ra, EPS);
            assert!((back - lon).abs() < 1e-10, "lon {} -> {}", lon, back);
        }
    }

    #[test]
    fn solstice_declination_equals_obliquity() {
        let dec = ecliptic_declination_rad(PI / 2.0, EPS);
        assert!((dec - EPS).abs() < 1e-12);
    }
}
