//! Benchmarks for the per-frame sampling path.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scrollstage::{
    ExtentCap, SectionMeasurement, StageConfig, StageEngine, StageMode, ViewportMetrics,
};

fn track_engine() -> StageEngine {
    let config = StageConfig {
        mode: StageMode::Track,
        extent_cap: ExtentCap::None,
        ..StageConfig::default()
    };
    let mut engine = StageEngine::new(&config);
    engine.remeasure(
        ViewportMetrics::new(1280.0, 800.0),
        SectionMeasurement::new(0.0, 800.0, 4200.0),
    );
    engine
}

fn timeline_engine(steps: usize) -> StageEngine {
    let config = StageConfig {
        mode: StageMode::Timeline,
        ..StageConfig::default()
    };
    let mut engine = StageEngine::new(&config);
    let height = steps as f32 * 160.0;
    engine.remeasure(
        ViewportMetrics::new(1280.0, 800.0),
        SectionMeasurement::new(600.0, height, height),
    );
    engine.set_step_centers((0..steps).map(|i| i as f32 * 160.0 + 80.0).collect());
    engine
}

/// One scroll sample on a track stage (the 60fps hot path)
fn bench_track_sample(c: &mut Criterion) {
    let mut engine = track_engine();
    let mut scroll_y = 0.0_f32;

    c.bench_function("track_sample", |b| {
        b.iter(|| {
            scroll_y = (scroll_y + 17.0) % 3800.0;
            black_box(engine.sample(black_box(scroll_y)))
        })
    });
}

/// One scroll sample on a timeline stage with a long step list
fn bench_timeline_sample(c: &mut Criterion) {
    let mut engine = timeline_engine(64);
    let mut scroll_y = 0.0_f32;

    c.bench_function("timeline_sample_64_steps", |b| {
        b.iter(|| {
            scroll_y = (scroll_y + 17.0) % 11_000.0;
            black_box(engine.sample(black_box(scroll_y)))
        })
    });
}

/// Full remeasure + sample, as a resize storm would trigger
fn bench_remeasure_and_sample(c: &mut Criterion) {
    let mut engine = track_engine();
    let mut width = 1280.0_f32;

    c.bench_function("remeasure_and_sample", |b| {
        b.iter(|| {
            width = if width > 1280.0 { 1280.0 } else { 1281.0 };
            engine.remeasure(
                ViewportMetrics::new(width, 800.0),
                SectionMeasurement::new(0.0, 800.0, 4200.0),
            );
            black_box(engine.sample(black_box(900.0)))
        })
    });
}

criterion_group!(
    benches,
    bench_track_sample,
    bench_timeline_sample,
    bench_remeasure_and_sample
);
criterion_main!(benches);
