//! Event searches and sky summaries built on the ephemeris engine.
//!
//! This crate provides:
//! - A bounded bisection root finder
//! - Next zodiac sign ingress per body (scan + bisection, pluggable)
//! - Lunar phase from the Sun–Moon elongation
//! - Aspect classification with configurable orbs
//! - The cosmic context summary for one instant
//! - Transit matching against a natal chart

pub mod aspect;
pub mod context;
pub mod error;
pub mod moon_phase;
pub mod root;
pub mod transit;
pub mod transition;

pub use aspect::{
    Aspect, AspectInput, AspectKind, ChartPoint, OrbTable, classify_separation, find_aspect,
};
pub use context::{ContextConfig, CosmicContext, summarize, summarize_with};
pub use error::SearchError;
pub use moon_phase::{MoonPhase, MoonPhaseName, SYNODIC_MONTH_DAYS, moon_phase};
pub use root::{BisectConfig, BisectError, bisect_root};
pub use transit::{Transit, filter_significant, match_transits, transits_for_context};
pub use transition::{
    BisectionTransitionFinder, SignTransition, SignTransitionFinder, TransitionFailure,
    TransitionSearchConfig, find_next_transition, scan_step_days,
};
