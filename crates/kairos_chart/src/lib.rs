//! Zodiac, house and natal chart calculations built on the ephemeris engine.
//!
//! This crate provides:
//! - Tropical zodiac placement with element, modality and DMS breakdown
//! - Ascendant, Midheaven and Placidus house cusps
//! - Natal chart computation from an instant or from civil birth data

pub mod angles;
pub mod birth;
pub mod chart;
pub mod error;
pub mod houses;
pub mod location;
pub mod zodiac;

pub use angles::{SiderealFrame, ascendant_rad, midheaven_rad};
pub use birth::BirthData;
pub use chart::{ChartPlacement, NatalChart, compute_chart, local_mean_noon_jd};
pub use error::ChartError;
pub use houses::{
    HOUSE_SYSTEM, House, HouseCusps, HouseKind, HouseSystem, MAX_HOUSE_LATITUDE_DEG,
    compute_houses,
};
pub use location::GeoLocation;
pub use zodiac::{
    ALL_SIGNS, Dms, Element, Modality, ZodiacPlacement, ZodiacSign, deg_to_dms, dms_to_deg,
    sign_index, zodiac_placement,
};
