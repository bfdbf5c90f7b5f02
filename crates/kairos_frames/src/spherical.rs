//! Cartesian ↔ spherical coordinate conversion.
//!
//! Distances carry whatever unit the caller's vectors use (AU for planets,
//! Earth radii for the Moon).

use crate::angle::normalize_360;

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, [-90, 90], elevation above the x-y plane.
    pub lat_deg: f64,
    /// Distance from the origin.
    pub distance: f64,
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: normalize_360(y.atan2(x).to_degrees()),
        lat_deg: (z / r).asin().to_degrees(),
        distance: r,
    }
}

/// Convert spherical coordinates back to Cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let lon = s.lon_deg.to_radians();
    let lat = s.lat_deg.to_radians();
    let cos_lat = lat.cos();
    [
        s.distance * cos_lat * lon.cos(),
        s.distance * cos_lat * lon.sin(),
        s.distance * lat.sin(),
    ]
}
