//! Sky summary for one instant: placements, lunar phase, upcoming sign
//! changes and the tight aspects currently in force.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kairos_chart::ChartPlacement;
use kairos_core::{Body, EclipticPosition, Engine};
use kairos_time::jd_from_datetime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aspect::{Aspect, AspectInput, ChartPoint, OrbTable, find_aspect};
use crate::error::SearchError;
use crate::moon_phase::{MoonPhase, moon_phase};
use crate::transition::{
    BisectionTransitionFinder, SignTransition, SignTransitionFinder, TransitionSearchConfig,
};

/// Summary configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Upper bound on the orb of aspects reported as tight.
    pub tight_orb_deg: f64,
    pub transition: TransitionSearchConfig,
    pub orbs: OrbTable,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            tight_orb_deg: 3.0,
            transition: TransitionSearchConfig::default(),
            orbs: OrbTable::default(),
        }
    }
}

impl ContextConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tight_orb_deg.is_finite() || self.tight_orb_deg < 0.0 {
            return Err("tight_orb_deg must be finite and non-negative");
        }
        self.transition.validate()?;
        self.orbs.validate()
    }
}

/// Immutable summary of the sky at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicContext {
    pub instant: DateTime<Utc>,
    pub placements: Vec<ChartPlacement>,
    pub moon_phase: MoonPhase,
    pub next_sign_transitions: BTreeMap<Body, SignTransition>,
    pub tight_aspects: Vec<Aspect>,
}

impl CosmicContext {
    pub fn placement(&self, body: Body) -> Option<&ChartPlacement> {
        self.placements.iter().find(|p| p.body() == body)
    }

    /// Positions in the engine's body order.
    pub fn positions(&self) -> Vec<EclipticPosition> {
        self.placements.iter().map(|p| p.position).collect()
    }
}

/// Summarize the sky at `instant` using the scan-and-bisect transition finder.
pub fn summarize(
    engine: &Engine,
    instant: &DateTime<Utc>,
    config: &ContextConfig,
) -> Result<CosmicContext, SearchError> {
    let finder = BisectionTransitionFinder::new(config.transition);
    summarize_with(engine, instant, config, &finder)
}

/// Summarize the sky at `instant` with a caller-supplied transition finder.
pub fn summarize_with<F>(
    engine: &Engine,
    instant: &DateTime<Utc>,
    config: &ContextConfig,
    finder: &F,
) -> Result<CosmicContext, SearchError>
where
    F: SignTransitionFinder + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let jd_ut = jd_from_datetime(instant);
    let positions = engine.positions_at_jd(jd_ut)?;

    let sun = longitude_of(engine, &positions, Body::Sun, jd_ut)?;
    let moon = longitude_of(engine, &positions, Body::Moon, jd_ut)?;
    let phase = moon_phase(sun, moon);

    let next_sign_transitions = positions
        .iter()
        .map(|p| (p.body, finder.next_transition(engine, p, jd_ut)))
        .collect();

    let tight_aspects = tight_aspects(&positions, &config.orbs.capped(config.tight_orb_deg));

    debug!(%instant, phase = %phase.name, aspects = tight_aspects.len(), "summarized context");

    Ok(CosmicContext {
        instant: *instant,
        placements: positions
            .into_iter()
            .map(ChartPlacement::from_position)
            .collect(),
        moon_phase: phase,
        next_sign_transitions,
        tight_aspects,
    })
}

fn longitude_of(
    engine: &Engine,
    positions: &[EclipticPosition],
    body: Body,
    jd_ut: f64,
) -> Result<f64, SearchError> {
    match positions.iter().find(|p| p.body == body) {
        Some(p) => Ok(p.longitude_deg),
        None => Ok(engine.longitude_at_jd(body, jd_ut)?),
    }
}

/// Aspects between every pair of positions, in body order.
fn tight_aspects(positions: &[EclipticPosition], orbs: &OrbTable) -> Vec<Aspect> {
    let inputs: Vec<AspectInput> = positions
        .iter()
        .map(|p| AspectInput {
            point: ChartPoint::Body(p.body),
            longitude_deg: p.longitude_deg,
            speed_deg_per_day: p.speed_deg_per_day,
        })
        .collect();

    let mut aspects = Vec::new();
    for (i, first) in inputs.iter().enumerate() {
        for second in &inputs[i + 1..] {
            if let Some(aspect) = find_aspect(first, second, orbs) {
                aspects.push(aspect);
            }
        }
    }
    aspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::AspectKind;

    fn pos(body: Body, lon: f64) -> EclipticPosition {
        EclipticPosition::new(body, lon, 1.0)
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ContextConfig::default().validate().is_ok());
    }

    #[test]
    fn tight_aspects_respect_cap() {
        let positions = [pos(Body::Sun, 10.0), pos(Body::Mars, 14.0), pos(Body::Venus, 105.0)];
        let orbs = OrbTable::default().capped(3.0);
        let aspects = tight_aspects(&positions, &orbs);
        // Sun–Mars conjunction (4°) and Sun–Venus square (5°) exceed the cap;
        // Mars–Venus is a square within 1°.
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Square);
        assert_eq!(aspects[0].first, ChartPoint::Body(Body::Mars));
        assert!(aspects.iter().all(|a| a.orb_deg <= 3.0));
    }

    #[test]
    fn rejects_negative_tight_orb() {
        let c = ContextConfig {
            tight_orb_deg: -1.0,
            ..ContextConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
