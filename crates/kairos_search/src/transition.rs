//! Next zodiac sign ingress for each body.
//!
//! Coarse scan with a per-body step until the sign index changes, then
//! bisection on the signed distance to the crossed boundary,
//! `normalize_pm180(lon(t) − boundary)`. Retrograde motion back into the
//! previous sign is detected the same way, against the lower boundary.

use chrono::{DateTime, Utc};
use kairos_chart::{ZodiacSign, sign_index};
use kairos_core::{Body, EclipticPosition, Engine, EngineError};
use kairos_frames::{normalize_pm180, signed_arc};
use kairos_time::datetime_from_jd;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::root::{BisectConfig, BisectError, bisect_root};

/// Next sign change of one body.
///
/// `at` and `to_sign` are both `None` when the change could not be located
/// within the search horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignTransition {
    pub body: Body,
    pub from_sign: ZodiacSign,
    pub to_sign: Option<ZodiacSign>,
    pub at: Option<DateTime<Utc>>,
}

impl SignTransition {
    pub fn unknown(body: Body, from_sign: ZodiacSign) -> Self {
        Self {
            body,
            from_sign,
            to_sign: None,
            at: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.at.is_some()
    }
}

/// Search parameters for sign transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSearchConfig {
    /// How far ahead to look, in days.
    pub horizon_days: f64,
    /// Maximum bisection iterations.
    pub max_iterations: u32,
    /// Convergence threshold in days (default 1e-6, ~0.09 s).
    pub tolerance_days: f64,
}

impl Default for TransitionSearchConfig {
    fn default() -> Self {
        Self {
            horizon_days: 400.0,
            max_iterations: 60,
            tolerance_days: 1e-6,
        }
    }
}

impl TransitionSearchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.horizon_days.is_finite() || self.horizon_days <= 0.0 {
            return Err("horizon_days must be positive");
        }
        self.bisect().validate()
    }

    fn bisect(&self) -> BisectConfig {
        BisectConfig {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance_days,
        }
    }
}

/// Coarse scan step per body, in days. Small enough that no body can cross
/// a whole sign between samples.
pub const fn scan_step_days(body: Body) -> f64 {
    match body {
        Body::Moon => 0.25,
        Body::Sun | Body::Mercury | Body::Venus | Body::Mars => 1.0,
        Body::Jupiter | Body::Saturn => 2.0,
        Body::Uranus | Body::Neptune => 4.0,
    }
}

/// Pluggable sign-transition lookup used by the context summary.
pub trait SignTransitionFinder: Send + Sync {
    /// Next sign change after `jd_ut` of the body whose position at `jd_ut`
    /// is `current`. Never fails: an unresolved search yields
    /// [`SignTransition::unknown`].
    fn next_transition(
        &self,
        engine: &Engine,
        current: &EclipticPosition,
        jd_ut: f64,
    ) -> SignTransition;
}

/// Why a transition search produced no instant.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionFailure {
    /// No sign change before the horizon.
    HorizonExhausted,
    /// Bisection did not settle on a crossing.
    NotConverged,
    /// The engine rejected an instant inside the search window.
    Engine(EngineError),
}

/// Scan-and-bisect finder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BisectionTransitionFinder {
    pub config: TransitionSearchConfig,
}

impl BisectionTransitionFinder {
    pub fn new(config: TransitionSearchConfig) -> Self {
        Self { config }
    }
}

impl SignTransitionFinder for BisectionTransitionFinder {
    fn next_transition(
        &self,
        engine: &Engine,
        current: &EclipticPosition,
        jd_ut: f64,
    ) -> SignTransition {
        let body = current.body;
        let from_sign = ZodiacSign::from_index(sign_index(current.longitude_deg));

        match find_next_transition(engine, body, jd_ut, &self.config) {
            Ok((jd, to_sign)) => match datetime_from_jd(jd) {
                Ok(at) => SignTransition {
                    body,
                    from_sign,
                    to_sign: Some(to_sign),
                    at: Some(at),
                },
                Err(e) => {
                    warn!(%body, jd, error = %e, "transition instant not representable");
                    SignTransition::unknown(body, from_sign)
                }
            },
            Err(TransitionFailure::HorizonExhausted) => {
                debug!(
                    %body,
                    jd_ut,
                    horizon = self.config.horizon_days,
                    "no sign change within horizon"
                );
                SignTransition::unknown(body, from_sign)
            }
            Err(failure) => {
                warn!(%body, jd_ut, ?failure, "sign transition search failed");
                SignTransition::unknown(body, from_sign)
            }
        }
    }
}

/// Locate the next sign change of `body` after `jd_ut`.
///
/// Returns the UT Julian Date of the crossing and the sign entered.
pub fn find_next_transition(
    engine: &Engine,
    body: Body,
    jd_ut: f64,
    config: &TransitionSearchConfig,
) -> Result<(f64, ZodiacSign), TransitionFailure> {
    let lon_at = |t: f64| engine.longitude_at_jd(body, t);

    let step = scan_step_days(body);
    let jd_end = jd_ut + config.horizon_days;

    let mut t_prev = jd_ut;
    let mut lon_prev = lon_at(t_prev).map_err(TransitionFailure::Engine)?;
    let start_sign = sign_index(lon_prev);

    while t_prev < jd_end {
        let t_curr = (t_prev + step).min(jd_end);
        let lon_curr = lon_at(t_curr).map_err(TransitionFailure::Engine)?;

        if sign_index(lon_curr) != start_sign {
            let sign = ZodiacSign::from_index(start_sign);
            let (boundary, entered) = if signed_arc(lon_prev, lon_curr) >= 0.0 {
                (sign.next().start_deg(), sign.next())
            } else {
                (sign.start_deg(), sign.previous())
            };

            let distance = |t: f64| lon_at(t).map(|lon| normalize_pm180(lon - boundary));
            return match bisect_root(t_prev, t_curr, distance, &config.bisect()) {
                Ok(jd) => Ok((jd, entered)),
                Err(BisectError::Eval(e)) => Err(TransitionFailure::Engine(e)),
                Err(_) => Err(TransitionFailure::NotConverged),
            };
        }

        t_prev = t_curr;
        lon_prev = lon_curr;
    }

    Err(TransitionFailure::HorizonExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TransitionSearchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_horizon() {
        let c = TransitionSearchConfig {
            horizon_days: 0.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        let c = TransitionSearchConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn steps_by_body() {
        assert_eq!(scan_step_days(Body::Moon), 0.25);
        assert_eq!(scan_step_days(Body::Mars), 1.0);
        assert_eq!(scan_step_days(Body::Saturn), 2.0);
        assert_eq!(scan_step_days(Body::Neptune), 4.0);
    }

    #[test]
    fn unknown_has_no_instant() {
        let t = SignTransition::unknown(Body::Neptune, ZodiacSign::Aries);
        assert!(!t.is_known());
        assert!(t.to_sign.is_none());
    }
}
