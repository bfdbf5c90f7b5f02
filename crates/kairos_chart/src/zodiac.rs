//! Zodiac sign and DMS (degrees-minutes-seconds) computation.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Aries at the vernal equinox. Given a tropical longitude we
//! identify the sign and express the position within it.

use std::fmt::{Display, Formatter};

use kairos_frames::normalize_360;
use serde::{Deserialize, Serialize};

/// The 12 tropical zodiac signs starting from Aries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Classical modality (quadruplicity) of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl ZodiacSign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sign at a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_SIGNS[(index % 12) as usize]
    }

    /// Following sign in zodiacal order.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Preceding sign in zodiacal order.
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 11)
    }

    /// Longitude of the first degree of the sign.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub const fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// All 12 signs in order.
    pub const fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees (0..29 within a sign, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:04.1}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// A longitude expressed as sign plus degree within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub sign: ZodiacSign,
    /// Decimal degrees within the sign, [0.0, 30.0).
    pub degree_in_sign: f64,
    pub dms: Dms,
}

/// Determine the zodiac placement of a tropical ecliptic longitude.
///
/// Each sign spans exactly 30 degrees: Aries = [0, 30), Taurus = [30, 60), etc.
pub fn zodiac_placement(longitude_deg: f64) -> ZodiacPlacement {
    let lon = normalize_360(longitude_deg);
    // Clamp to 11 in case of floating point edge (exactly 360.0)
    let index = ((lon / 30.0).floor() as u8).min(11);
    let degree_in_sign = lon - index as f64 * 30.0;
    ZodiacPlacement {
        sign: ZodiacSign::from_index(index),
        degree_in_sign,
        dms: deg_to_dms(degree_in_sign),
    }
}

/// Sign index (0..=11) of a longitude.
pub fn sign_index(longitude_deg: f64) -> u8 {
    zodiac_placement(longitude_deg).sign.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_indices_sequential() {
        for (i, s) in ALL_SIGNS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(ZodiacSign::from_index(i as u8), *s);
        }
    }

    #[test]
    fn next_and_previous_wrap() {
        assert_eq!(ZodiacSign::Pisces.next(), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::Aries.previous(), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::Leo.next().previous(), ZodiacSign::Leo);
    }

    #[test]
    fn elements_and_modalities() {
        assert_eq!(ZodiacSign::Aries.element(), Element::Fire);
        assert_eq!(ZodiacSign::Taurus.element(), Element::Earth);
        assert_eq!(ZodiacSign::Gemini.element(), Element::Air);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
        assert_eq!(ZodiacSign::Cancer.modality(), Modality::Cardinal);
        assert_eq!(ZodiacSign::Scorpio.modality(), Modality::Fixed);
        assert_eq!(ZodiacSign::Pisces.modality(), Modality::Mutable);
    }

    #[test]
    fn deg_to_dms_known() {
        // 23.853 deg = 23 deg 51' 10.8"
        let d = deg_to_dms(23.853);
        assert_eq!(d.degrees, 23);
        assert_eq!(d.minutes, 51);
        assert!((d.seconds - 10.8).abs() < 0.01);
        assert!((dms_to_deg(&d) - 23.853).abs() < 1e-9);
    }

    #[test]
    fn boundary_belongs_to_next_sign() {
        for i in 0..12u8 {
            let p = zodiac_placement(i as f64 * 30.0);
            assert_eq!(p.sign.index(), i, "boundary at {} deg", i as f64 * 30.0);
            assert!(p.degree_in_sign.abs() < 1e-10);
        }
    }

    #[test]
    fn mid_sign() {
        let p = zodiac_placement(45.5);
        assert_eq!(p.sign, ZodiacSign::Taurus);
        assert!((p.degree_in_sign - 15.5).abs() < 1e-10);
        assert_eq!(p.dms.degrees, 15);
        assert_eq!(p.dms.minutes, 30);
    }

    #[test]
    fn wraps_and_negative() {
        let p = zodiac_placement(365.0);
        assert_eq!(p.sign, ZodiacSign::Aries);
        assert!((p.degree_in_sign - 5.0).abs() < 1e-10);

        let q = zodiac_placement(-10.0);
        assert_eq!(q.sign, ZodiacSign::Pisces);
        assert!((q.degree_in_sign - 20.0).abs() < 1e-10);
    }

    #[test]
    fn just_below_360_is_pisces() {
        let p = zodiac_placement(359.999_999);
        assert_eq!(p.sign, ZodiacSign::Pisces);
        assert!(p.degree_in_sign < 30.0);
    }
}
