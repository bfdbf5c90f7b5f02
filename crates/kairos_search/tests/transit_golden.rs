//! Transit matching against computed natal charts.

use chrono::{TimeZone, Utc};
use kairos_chart::{GeoLocation, compute_chart};
use kairos_core::{Engine, EngineConfig};
use kairos_search::{
    ChartPoint, ContextConfig, OrbTable, filter_significant, match_transits, summarize,
    transits_for_context,
};

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).expect("default config is valid")
}

#[test]
fn transits_include_angles_with_exact_time() {
    let engine = engine();
    let birth = Utc.with_ymd_and_hms(1990, 7, 15, 18, 30, 0).unwrap();
    let loc = GeoLocation::new(40.7128, -74.006);
    let natal = compute_chart(&engine, &birth, &loc, true).unwrap();

    // Matching a chart against itself: every natal body is conjunct itself,
    // and the angles are available as natal points.
    let positions = engine.positions_at(&birth).unwrap();
    let transits = match_transits(&positions, birth, &natal, &OrbTable::default());
    for p in &positions {
        assert!(transits.iter().any(|t| {
            t.transiting == p.body && t.natal == ChartPoint::Body(p.body) && t.aspect.orb_deg < 1e-9
        }));
    }
    let houses = natal.require_houses().unwrap();
    let angle_targets = transits
        .iter()
        .filter(|t| matches!(t.natal, ChartPoint::Ascendant | ChartPoint::Midheaven))
        .count();
    // Not every chart has a body aspecting an angle, but the angle longitudes
    // must be in range either way.
    assert!(angle_targets <= positions.len() * 2);
    assert!((0.0..360.0).contains(&houses.ascendant_deg));
}

#[test]
fn no_angles_without_birth_time() {
    let engine = engine();
    let birth = Utc.with_ymd_and_hms(1985, 2, 1, 0, 0, 0).unwrap();
    let natal = compute_chart(&engine, &birth, &GeoLocation::new(48.85, 2.35), false).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
    let ctx = summarize(&engine, &now, &ContextConfig::default()).unwrap();
    let transits = transits_for_context(&ctx, &natal, &OrbTable::default());
    assert!(transits.iter().all(|t| matches!(t.natal, ChartPoint::Body(_))));
    assert!(transits.iter().all(|t| t.evaluated_at == now));

    let significant = filter_significant(&transits, 2.0);
    assert!(significant.iter().all(|t| t.aspect.orb_deg <= 2.0));
    assert!(significant.windows(2).all(|w| w[0].aspect.orb_deg <= w[1].aspect.orb_deg));
}

#[test]
fn transits_serialize() {
    let engine = engine();
    let birth = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let natal = compute_chart(&engine, &birth, &GeoLocation::new(51.5, -0.13), true).unwrap();
    let positions = engine.positions_at(&birth).unwrap();
    let transits = match_transits(&positions, birth, &natal, &OrbTable::default());
    let json = serde_json::to_value(&transits).unwrap();
    assert_eq!(json.as_array().unwrap().len(), transits.len());
    assert!(json[0]["aspect"]["kind"].is_string());
}
