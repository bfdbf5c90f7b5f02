//! Lunar phase from the Sun–Moon elongation.

use std::fmt::{Display, Formatter};

use kairos_frames::normalize_360;
use serde::{Deserialize, Serialize};

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Eight named phases, each a 45° bin of elongation centred on its nominal
/// angle (New at 0°, First Quarter at 90°, Full at 180°, Last Quarter at 270°).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

const ALL_PHASES: [MoonPhaseName; 8] = [
    MoonPhaseName::New,
    MoonPhaseName::WaxingCrescent,
    MoonPhaseName::FirstQuarter,
    MoonPhaseName::WaxingGibbous,
    MoonPhaseName::Full,
    MoonPhaseName::WaningGibbous,
    MoonPhaseName::LastQuarter,
    MoonPhaseName::WaningCrescent,
];

impl MoonPhaseName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Phase containing an elongation in degrees.
    pub fn from_elongation(elongation_deg: f64) -> Self {
        let bin = (normalize_360(elongation_deg + 22.5) / 45.0).floor() as usize;
        ALL_PHASES[bin.min(7)]
    }
}

impl Display for MoonPhaseName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub name: MoonPhaseName,
    /// Moon minus Sun longitude, [0, 360).
    pub elongation_deg: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub illumination: f64,
    /// Days since new moon on a mean synodic month.
    pub age_days: f64,
    pub waxing: bool,
}

/// Phase from geocentric ecliptic longitudes of Sun and Moon.
pub fn moon_phase(sun_lon_deg: f64, moon_lon_deg: f64) -> MoonPhase {
    let elongation = normalize_360(moon_lon_deg - sun_lon_deg);
    MoonPhase {
        name: MoonPhaseName::from_elongation(elongation),
        elongation_deg: elongation,
        illumination: (1.0 - elongation.to_radians().cos()) / 2.0,
        age_days: elongation / 360.0 * SYNODIC_MONTH_DAYS,
        waxing: elongation < 180.0,
    }
}
