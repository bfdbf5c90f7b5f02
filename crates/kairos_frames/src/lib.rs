//! Angle and coordinate frame helpers for ephemeris computations.
//!
//! Provides the single angle-normalization routine used across the
//! workspace, the mean obliquity of date, ecliptic ↔ equatorial conversion
//! for ecliptic points, and Cartesian ↔ spherical conversion.

pub mod angle;
pub mod obliquity;
pub mod rotation;
pub mod spherical;

pub use angle::{arc_forward, normalize_360, normalize_pm180, separation_deg, signed_arc};
pub use obliquity::{mean_obliquity_deg, mean_obliquity_rad};
pub use rotation::{
    ecliptic_declination_rad, ecliptic_to_right_ascension_rad, right_ascension_to_ecliptic_rad,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
