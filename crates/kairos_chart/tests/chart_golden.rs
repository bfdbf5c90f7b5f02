//! Golden and property tests for natal chart computation.

use chrono::{DateTime, TimeZone, Utc};
use kairos_chart::{
    ChartError, GeoLocation, HOUSE_SYSTEM, HouseSystem, ZodiacSign, compute_chart,
};
use kairos_core::{Body, Engine, EngineConfig};
use kairos_frames::{arc_forward, normalize_pm180};

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).expect("default config is valid")
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn london() -> GeoLocation {
    GeoLocation::new(51.5074, -0.1278)
}

#[test]
fn london_j2000_angles() {
    let chart = compute_chart(&engine(), &utc(2000, 1, 1, 12, 0), &london(), true).unwrap();
    let houses = chart.require_houses().unwrap();
    assert_eq!(houses.system, HouseSystem::Placidus);
    let asc = houses.ascendant_deg;
    let mc = houses.midheaven_deg;
    assert!(normalize_pm180(asc - 24.02).abs() < 0.2, "asc = {asc}");
    assert!(normalize_pm180(mc - 279.50).abs() < 0.2, "mc = {mc}");
    // Placidus intermediate cusps for the same moment.
    assert!(normalize_pm180(houses.houses[1].cusp_deg - 61.0).abs() < 0.3);
    assert!(normalize_pm180(houses.houses[10].cusp_deg - 298.9).abs() < 0.3);
}

#[test]
fn chart_is_deterministic() {
    let engine = engine();
    let t = utc(1987, 11, 3, 4, 45);
    let loc = GeoLocation::new(-33.8688, 151.2093);
    let a = compute_chart(&engine, &t, &loc, true).unwrap();
    let b = compute_chart(&engine, &t, &loc, true).unwrap();
    assert_eq!(a, b);
}

#[test]
fn no_exact_time_means_no_houses() {
    let chart = compute_chart(&engine(), &utc(1990, 7, 15, 3, 0), &london(), false).unwrap();
    assert!(!chart.has_exact_time);
    assert!(chart.houses.is_none());
    assert!(chart.house_of(Body::Sun).is_none());
    assert!(matches!(
        chart.require_houses(),
        Err(ChartError::IncompleteBirthData(_))
    ));
    assert!(chart.ascendant_deg().is_err());
    assert!(chart.midheaven_deg().is_err());
}

#[test]
fn no_exact_time_uses_local_noon() {
    let loc = GeoLocation::new(35.6762, 139.6503);
    let chart = compute_chart(&engine(), &utc(2001, 5, 20, 1, 0), &loc, false).unwrap();
    // Tokyo local mean noon is about 02:41 UT on the same date.
    let diff = chart.chart_instant - utc(2001, 5, 20, 2, 41);
    assert!(diff.num_seconds().abs() < 60, "chart instant {}", chart.chart_instant);
    assert_eq!(chart.birth_instant, utc(2001, 5, 20, 1, 0));
}

#[test]
fn exact_time_chart_has_angles_and_houses() {
    let chart = compute_chart(&engine(), &utc(2024, 3, 20, 12, 0), &london(), true).unwrap();
    let houses = chart.require_houses().unwrap();
    assert_eq!(houses.system, HOUSE_SYSTEM);
    let arc = arc_forward(houses.midheaven_deg, houses.ascendant_deg);
    assert!(arc > 0.0 && arc < 180.0);
    for body in Body::ALL {
        let house = chart.house_of(body).unwrap();
        assert!((1..=12).contains(&house));
    }
    // Around noon the Sun sits near the Midheaven: houses 9 or 10.
    let sun_house = chart.house_of(Body::Sun).unwrap();
    assert!(sun_house == 9 || sun_house == 10, "sun in house {sun_house}");
}

#[test]
fn placements_match_signs() {
    let chart = compute_chart(&engine(), &utc(2024, 6, 21, 12, 0), &london(), false).unwrap();
    assert_eq!(chart.placements.len(), Body::ALL.len());
    let sun = chart.placement(Body::Sun).unwrap();
    assert!(
        sun.zodiac.sign == ZodiacSign::Cancer || sun.zodiac.sign == ZodiacSign::Gemini,
        "{:?}",
        sun.zodiac
    );
    for p in &chart.placements {
        assert!((0.0..30.0).contains(&p.zodiac.degree_in_sign));
        let rebuilt = p.zodiac.sign.start_deg() + p.zodiac.degree_in_sign;
        assert!((rebuilt - p.longitude_deg()).abs() < 1e-9);
    }
}

#[test]
fn invalid_location_rejected_before_computation() {
    let err = compute_chart(
        &engine(),
        &utc(2024, 1, 1, 0, 0),
        &GeoLocation::new(95.0, 0.0),
        false,
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::InvalidLocation(_)));
}

#[test]
fn polar_latitude_needs_no_time() {
    let loc = GeoLocation::new(78.22, 15.65);
    let t = utc(2024, 1, 1, 0, 0);
    assert!(matches!(
        compute_chart(&engine(), &t, &loc, true),
        Err(ChartError::InvalidLocation(_))
    ));
    assert!(compute_chart(&engine(), &t, &loc, false).is_ok());
}

#[test]
fn out_of_range_birth_surfaces_engine_error() {
    let t = utc(1750, 1, 1, 0, 0);
    assert!(matches!(
        compute_chart(&engine(), &t, &london(), true),
        Err(ChartError::Engine(_))
    ));
}

#[test]
fn chart_without_time_serializes_null_houses() {
    let chart = compute_chart(&engine(), &utc(1995, 2, 2, 0, 0), &london(), false).unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert!(json["houses"].is_null());
    assert_eq!(json["placements"].as_array().unwrap().len(), 9);
}
