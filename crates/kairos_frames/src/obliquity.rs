//! Mean obliquity of the ecliptic of date.
//!
//! Source: IAU 1980 expression, Meeus "Astronomical Algorithms" Eq. 22.2.

/// Mean obliquity in degrees for Julian centuries `t` of TT since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

/// Mean obliquity in radians.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    mean_obliquity_deg(t).to_radians()
}
