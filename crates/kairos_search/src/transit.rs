//! Transit matching: current positions against a natal chart.

use chrono::{DateTime, Utc};
use kairos_chart::NatalChart;
use kairos_core::{Body, EclipticPosition};
use serde::{Deserialize, Serialize};

use crate::aspect::{Aspect, AspectInput, ChartPoint, OrbTable, find_aspect};
use crate::context::CosmicContext;

/// An aspect from a transiting body to a natal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub transiting: Body,
    pub natal: ChartPoint,
    pub aspect: Aspect,
    pub evaluated_at: DateTime<Utc>,
}

impl Transit {
    pub fn orb_deg(&self) -> f64 {
        self.aspect.orb_deg
    }
}

/// Natal points with fixed longitudes: every placement, plus the Ascendant
/// and Midheaven when the chart has houses.
fn natal_points(natal: &NatalChart) -> Vec<AspectInput> {
    let mut points: Vec<AspectInput> = natal
        .placements
        .iter()
        .map(|p| AspectInput {
            point: ChartPoint::Body(p.body()),
            longitude_deg: p.longitude_deg(),
            speed_deg_per_day: 0.0,
        })
        .collect();
    if let Some(houses) = &natal.houses {
        for (point, lon) in [
            (ChartPoint::Ascendant, houses.ascendant_deg),
            (ChartPoint::Midheaven, houses.midheaven_deg),
        ] {
            points.push(AspectInput {
                point,
                longitude_deg: lon,
                speed_deg_per_day: 0.0,
            });
        }
    }
    points
}

/// Every (transiting body, natal point) pair that forms an aspect within
/// `orbs`, ordered by transiting body then natal point.
pub fn match_transits(
    current: &[EclipticPosition],
    evaluated_at: DateTime<Utc>,
    natal: &NatalChart,
    orbs: &OrbTable,
) -> Vec<Transit> {
    let natal = natal_points(natal);
    let mut transits = Vec::new();
    for position in current {
        let transiting = AspectInput {
            point: ChartPoint::Body(position.body),
            longitude_deg: position.longitude_deg,
            speed_deg_per_day: position.speed_deg_per_day,
        };
        for point in &natal {
            if let Some(aspect) = find_aspect(&transiting, point, orbs) {
                transits.push(Transit {
                    transiting: position.body,
                    natal: point.point,
                    aspect,
                    evaluated_at,
                });
            }
        }
    }
    transits
}

/// [`match_transits`] for the positions of a summarized context.
pub fn transits_for_context(
    context: &CosmicContext,
    natal: &NatalChart,
    orbs: &OrbTable,
) -> Vec<Transit> {
    match_transits(&context.positions(), context.instant, natal, orbs)
}

/// Transits with orb at most `max_orb_deg`, tightest first. Equal orbs keep
/// their input order.
pub fn filter_significant(transits: &[Transit], max_orb_deg: f64) -> Vec<Transit> {
    let mut significant: Vec<Transit> = transits
        .iter()
        .filter(|t| t.aspect.orb_deg <= max_orb_deg)
        .copied()
        .collect();
    significant.sort_by(|a, b| a.aspect.orb_deg.total_cmp(&b.aspect.orb_deg));
    significant
}
