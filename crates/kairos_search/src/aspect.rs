//! Angular aspects between chart points.
//!
//! The separation of two longitudes is folded into [0, 180] and compared
//! against each aspect's exact angle. An aspect exists when the deviation
//! (the orb) does not exceed that aspect's allowance; when several qualify
//! the tightest one is kept.

use std::fmt::{Display, Formatter};

use kairos_core::Body;
use kairos_frames::{separation_deg, signed_arc};
use serde::{Deserialize, Serialize};

/// Aspect kinds with their exact angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 10] = [
        Self::Conjunction,
        Self::SemiSextile,
        Self::SemiSquare,
        Self::Sextile,
        Self::Quintile,
        Self::Square,
        Self::Trine,
        Self::Sesquiquadrate,
        Self::Quincunx,
        Self::Opposition,
    ];

    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::SemiSextile => 30.0,
            Self::SemiSquare => 45.0,
            Self::Sextile => 60.0,
            Self::Quintile => 72.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Sesquiquadrate => 135.0,
            Self::Quincunx => 150.0,
            Self::Opposition => 180.0,
        }
    }

    /// Ptolemaic aspects.
    pub const fn is_major(self) -> bool {
        matches!(
            self,
            Self::Conjunction | Self::Sextile | Self::Square | Self::Trine | Self::Opposition
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::SemiSextile => "Semi-sextile",
            Self::SemiSquare => "Semi-square",
            Self::Sextile => "Sextile",
            Self::Quintile => "Quintile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Sesquiquadrate => "Sesquiquadrate",
            Self::Quincunx => "Quincunx",
            Self::Opposition => "Opposition",
        }
    }
}

impl Display for AspectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A point that can take part in an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPoint {
    Body(Body),
    Ascendant,
    Midheaven,
}

impl Display for ChartPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Body(b) => write!(f, "{b}"),
            Self::Ascendant => f.write_str("Ascendant"),
            Self::Midheaven => f.write_str("Midheaven"),
        }
    }
}

/// Maximum orb per aspect kind, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTable {
    pub conjunction: f64,
    pub opposition: f64,
    pub square: f64,
    pub trine: f64,
    pub sextile: f64,
    /// Shared allowance for every minor aspect.
    pub minor: f64,
    pub include_minor: bool,
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            opposition: 8.0,
            square: 7.0,
            trine: 7.0,
            sextile: 5.0,
            minor: 2.0,
            include_minor: false,
        }
    }
}

impl OrbTable {
    /// Allowance for `kind`, or `None` when the kind is disabled.
    pub fn max_orb(&self, kind: AspectKind) -> Option<f64> {
        match kind {
            AspectKind::Conjunction => Some(self.conjunction),
            AspectKind::Opposition => Some(self.opposition),
            AspectKind::Square => Some(self.square),
            AspectKind::Trine => Some(self.trine),
            AspectKind::Sextile => Some(self.sextile),
            _ if self.include_minor => Some(self.minor),
            _ => None,
        }
    }

    /// Same table with every allowance capped at `max_orb_deg`.
    pub fn capped(&self, max_orb_deg: f64) -> Self {
        Self {
            conjunction: self.conjunction.min(max_orb_deg),
            opposition: self.opposition.min(max_orb_deg),
            square: self.square.min(max_orb_deg),
            trine: self.trine.min(max_orb_deg),
            sextile: self.sextile.min(max_orb_deg),
            minor: self.minor.min(max_orb_deg),
            include_minor: self.include_minor,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let orbs = [
            self.conjunction,
            self.opposition,
            self.square,
            self.trine,
            self.sextile,
            self.minor,
        ];
        if orbs.iter().any(|o| !o.is_finite() || *o < 0.0) {
            return Err("orbs must be finite and non-negative");
        }
        if orbs.iter().any(|o| *o > 15.0) {
            return Err("orbs must not exceed 15 degrees");
        }
        Ok(())
    }
}

/// An aspect between two chart points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: ChartPoint,
    pub second: ChartPoint,
    pub kind: AspectKind,
    pub exact_angle_deg: f64,
    /// Folded separation, [0, 180].
    pub separation_deg: f64,
    /// Deviation from the exact angle, ≥ 0.
    pub orb_deg: f64,
    /// Relative motion is closing the orb.
    pub applying: bool,
}

/// Tightest qualifying aspect for a folded separation.
pub fn classify_separation(separation_deg: f64, orbs: &OrbTable) -> Option<(AspectKind, f64)> {
    AspectKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let allowance = orbs.max_orb(kind)?;
            let orb = (separation_deg - kind.angle_deg()).abs();
            (orb <= allowance).then_some((kind, orb))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// One side of an aspect: identity, longitude and daily motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectInput {
    pub point: ChartPoint,
    pub longitude_deg: f64,
    pub speed_deg_per_day: f64,
}

/// Aspect between two points, if any qualifies under `orbs`.
pub fn find_aspect(first: &AspectInput, second: &AspectInput, orbs: &OrbTable) -> Option<Aspect> {
    let separation = separation_deg(first.longitude_deg, second.longitude_deg);
    let (kind, orb) = classify_separation(separation, orbs)?;

    // d(separation)/dt: separation grows when the leading point moves away.
    let signed = signed_arc(second.longitude_deg, first.longitude_deg);
    let relative_speed = first.speed_deg_per_day - second.speed_deg_per_day;
    let separation_rate = if signed >= 0.0 {
        relative_speed
    } else {
        -relative_speed
    };
    let offset = separation - kind.angle_deg();
    let orb_rate = if offset > 0.0 {
        separation_rate
    } else if offset < 0.0 {
        -separation_rate
    } else {
        0.0
    };

    Some(Aspect {
        first: first.point,
        second: second.point,
        kind,
        exact_angle_deg: kind.angle_deg(),
        separation_deg: separation,
        orb_deg: orb,
        applying: orb_rate < 0.0,
    })
}
