//! Facade over the kairos astronomical computation core.
//!
//! [`Kairos`] bundles an engine, a batch processor and their configuration.
//! For scripts there is also a global instance with free functions that
//! mirror its methods.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use kairos_rs::{Kairos, KairosConfig};
//!
//! let kairos = Kairos::new(KairosConfig::default()).unwrap();
//! let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
//! let context = kairos.summarize(&now).unwrap();
//! println!("{} ({:.0}% lit)", context.moon_phase.name, context.moon_phase.illumination * 100.0);
//! ```

pub mod convenience;
pub mod error;
pub mod facade;
pub mod global;

pub use convenience::{compute_chart, compute_range, match_transits, positions_at, summarize};
pub use error::KairosError;
pub use facade::Kairos;
pub use global::{init, is_initialized};

pub use chrono_tz::Tz;

// Re-export the types callers need so `use kairos_rs::*` is enough.
pub use kairos_batch::{BatchConfig, BatchStats};
pub use kairos_chart::{
    BirthData, ChartPlacement, GeoLocation, HouseCusps, NatalChart, ZodiacPlacement, ZodiacSign,
};
pub use kairos_config::KairosConfig;
pub use kairos_core::{Body, EclipticPosition, EngineConfig};
pub use kairos_search::{
    Aspect, AspectKind, ChartPoint, ContextConfig, CosmicContext, MoonPhase, MoonPhaseName,
    OrbTable, SignTransition, Transit, filter_significant,
};
