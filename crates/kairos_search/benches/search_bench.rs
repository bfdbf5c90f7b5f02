use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kairos_chart::{GeoLocation, compute_chart};
use kairos_core::{Body, Engine, EngineConfig};
use kairos_search::{
    ContextConfig, OrbTable, TransitionSearchConfig, filter_significant, find_next_transition,
    match_transits, summarize,
};

fn transition_bench(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let config = TransitionSearchConfig::default();
    let jd = 2_460_310.5;

    let mut group = c.benchmark_group("sign_transition");
    group.bench_function("moon", |b| {
        b.iter(|| find_next_transition(&engine, Body::Moon, black_box(jd), &config))
    });
    group.bench_function("sun", |b| {
        b.iter(|| find_next_transition(&engine, Body::Sun, black_box(jd), &config))
    });
    group.finish();
}

fn context_bench(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let config = ContextConfig::default();
    c.bench_function("summarize", |b| {
        b.iter(|| summarize(&engine, black_box(&t), &config))
    });
}

fn transit_bench(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let birth = Utc.with_ymd_and_hms(1990, 7, 15, 18, 30, 0).unwrap();
    let natal = compute_chart(&engine, &birth, &GeoLocation::new(40.71, -74.0), true).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let positions = engine.positions_at(&now).unwrap();
    let orbs = OrbTable::default();
    c.bench_function("match_and_filter_transits", |b| {
        b.iter(|| {
            let all = match_transits(black_box(&positions), now, &natal, &orbs);
            filter_significant(&all, 3.0)
        })
    });
}

criterion_group!(benches, transition_bench, context_bench, transit_bench);
criterion_main!(benches);
