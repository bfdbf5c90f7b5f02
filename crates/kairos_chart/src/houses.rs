//! House cusps.
//!
//! The workspace uses a single house system, Placidus, fixed by
//! [`HOUSE_SYSTEM`]. Cusps 10 and 1 are the Midheaven and Ascendant;
//! cusps 11, 12, 2 and 3 trisect the semi-arcs in time; the remaining cusps
//! are opposite points.

use std::f64::consts::PI;

use kairos_frames::{
    arc_forward, ecliptic_declination_rad, normalize_360, right_ascension_to_ecliptic_rad,
};
use serde::{Deserialize, Serialize};

use crate::angles::{SiderealFrame, ascendant_rad, midheaven_rad};
use crate::error::ChartError;

/// Supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HouseSystem {
    /// Placidus: time-based semi-arc trisection.
    Placidus,
}

/// House system used for every chart.
pub const HOUSE_SYSTEM: HouseSystem = HouseSystem::Placidus;

/// Placidus is undefined where parts of the ecliptic never rise or set.
pub const MAX_HOUSE_LATITUDE_DEG: f64 = 66.5;

/// Bisection cap for a single cusp. The bracket is π wide, so 50 halvings
/// reach well below 1e-12 rad.
const CUSP_MAX_ITER: usize = 50;
const CUSP_TOLERANCE_RAD: f64 = 1e-12;

/// Angular, succedent or cadent classification of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseKind {
    Angular,
    Succedent,
    Cadent,
}

/// A single house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// House number, 1-12.
    pub number: u8,
    /// Ecliptic longitude of the cusp, [0, 360).
    pub cusp_deg: f64,
}

impl House {
    pub const fn kind(&self) -> HouseKind {
        match self.number % 3 {
            1 => HouseKind::Angular,
            2 => HouseKind::Succedent,
            _ => HouseKind::Cadent,
        }
    }
}

/// Twelve house cusps with the chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    pub houses: [House; 12],
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
}

impl HouseCusps {
    /// Cusp longitude of house `number` (1-12).
    pub fn cusp(&self, number: u8) -> Option<f64> {
        (1..=12)
            .contains(&number)
            .then(|| self.houses[number as usize - 1].cusp_deg)
    }

    /// House number (1-12) containing an ecliptic longitude.
    pub fn house_of(&self, longitude_deg: f64) -> u8 {
        let lon = normalize_360(longitude_deg);
        for i in 0..12 {
            let start = self.houses[i].cusp_deg;
            let end = self.houses[(i + 1) % 12].cusp_deg;
            if arc_forward(start, lon) < arc_forward(start, end) {
                return self.houses[i].number;
            }
        }
        // Unreachable for ordered cusps; fall back to the last house.
        12
    }
}

/// Compute house cusps with [`HOUSE_SYSTEM`].
pub fn compute_houses(frame: &SiderealFrame) -> Result<HouseCusps, ChartError> {
    // Small slack absorbs the degree/radian round trip at exactly 66.5°.
    if frame.latitude_rad.to_degrees().abs() > MAX_HOUSE_LATITUDE_DEG + 1e-9 {
        return Err(ChartError::InvalidLocation(
            "house cusps are undefined beyond 66.5 degrees latitude",
        ));
    }

    let asc = normalize_360(ascendant_rad(frame).to_degrees());
    let mc = normalize_360(midheaven_rad(frame).to_degrees());
    let cusps = compute_placidus(frame, asc, mc)?;

    let mut houses = [House {
        number: 0,
        cusp_deg: 0.0,
    }; 12];
    for (i, cusp) in cusps.into_iter().enumerate() {
        houses[i] = House {
            number: i as u8 + 1,
            cusp_deg: cusp,
        };
    }

    Ok(HouseCusps {
        system: HOUSE_SYSTEM,
        houses,
        ascendant_deg: asc,
        midheaven_deg: mc,
    })
}

fn compute_placidus(
    frame: &SiderealFrame,
    asc_deg: f64,
    mc_deg: f64,
) -> Result<[f64; 12], ChartError> {
    let mut cusps = [0.0; 12];
    cusps[0] = asc_deg;
    cusps[3] = normalize_360(mc_deg + 180.0);
    cusps[6] = normalize_360(asc_deg + 180.0);
    cusps[9] = mc_deg;

    // Above the horizon: MC -> Asc, diurnal semi-arc.
    cusps[10] = placidus_cusp(frame, 1.0 / 3.0, SemiArc::Diurnal)?;
    cusps[11] = placidus_cusp(frame, 2.0 / 3.0, SemiArc::Diurnal)?;

    // Below the horizon: Asc -> IC, nocturnal semi-arc.
    cusps[1] = placidus_cusp(frame, 2.0 / 3.0, SemiArc::Nocturnal)?;
    cusps[2] = placidus_cusp(frame, 1.0 / 3.0, SemiArc::Nocturnal)?;

    cusps[4] = normalize_360(cusps[10] + 180.0);
    cusps[5] = normalize_360(cusps[11] + 180.0);
    cusps[7] = normalize_360(cusps[1] + 180.0);
    cusps[8] = normalize_360(cusps[2] + 180.0);

    Ok(cusps)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SemiArc {
    Diurnal,
    Nocturnal,
}

/// Diurnal semi-arc of an ecliptic point, radians.
///
/// `cos(DSA) = −tan φ · tan δ`
fn diurnal_semi_arc_rad(ra: f64, frame: &SiderealFrame) -> Result<f64, ChartError> {
    let lon = right_ascension_to_ecliptic_rad(ra, frame.obliquity_rad);
    let dec = ecliptic_declination_rad(lon, frame.obliquity_rad);
    let cos_dsa = -frame.latitude_rad.tan() * dec.tan();
    if cos_dsa.abs() > 1.0 {
        return Err(ChartError::InvalidLocation(
            "ecliptic point is circumpolar at this latitude",
        ));
    }
    Ok(cos_dsa.acos())
}

/// Solve one intermediate cusp.
///
/// Diurnal cusps satisfy `RA = RAMC + f·DSA(RA)`; nocturnal cusps satisfy
/// `RA = RAMC + π − f·NSA(RA)` with `NSA = π − DSA`. Both residuals are
/// negative at `RA = RAMC` and non-negative at `RA = RAMC + π`, so the root
/// is bracketed and found by bisection.
fn placidus_cusp(frame: &SiderealFrame, fraction: f64, arc: SemiArc) -> Result<f64, ChartError> {
    let ramc = frame.ramc_rad;
    let residual = |ra: f64| -> Result<f64, ChartError> {
        let dsa = diurnal_semi_arc_rad(ra, frame)?;
        let target = match arc {
            SemiArc::Diurnal => ramc + fraction * dsa,
            SemiArc::Nocturnal => ramc + PI - fraction * (PI - dsa),
        };
        Ok(ra - target)
    };

    let mut lo = ramc;
    let mut hi = ramc + PI;
    for _ in 0..CUSP_MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if residual(mid)? <= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < CUSP_TOLERANCE_RAD {
            let ra = 0.5 * (lo + hi);
            let lon = right_ascension_to_ecliptic_rad(ra, frame.obliquity_rad);
            return Ok(normalize_360(lon.to_degrees()));
        }
    }
    Err(ChartError::NoConvergence("placidus cusp did not converge"))
}
