//! Engine pipeline tests
//!
//! Drives `StageEngine` end to end the way the browser binding does, but
//! through a recording surface instead of a DOM: measurements and scroll
//! samples in, transform writes out.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use scrollstage::{
    ExtentCap, ProgressSurface, ScrollStage, SectionMeasurement, StageConfig, StageEngine,
    StageMode, ViewportMetrics,
};

/// Records every write a frame makes, in order.
#[derive(Default)]
struct RecordingSurface {
    offsets: Vec<f32>,
    fills: Vec<(f32, f32)>,
    revealed: Vec<usize>,
    animated: Option<bool>,
}

impl ProgressSurface for RecordingSurface {
    fn apply_track_offset(&mut self, offset_px: f32) {
        self.offsets.push(offset_px);
    }

    fn apply_fill(&mut self, fill_frac: f32, spark_top_px: f32) {
        self.fills.push((fill_frac, spark_top_px));
    }

    fn reveal_step(&mut self, index: usize) {
        self.revealed.push(index);
    }

    fn set_animated(&mut self, animated: bool) {
        self.animated = Some(animated);
    }
}

/// Track engine over the standard scenario: vw=1000, vh=800, track=2000,
/// section top at 0. Overflow 1000, pinned extent 1800.
fn track_engine() -> StageEngine {
    let config = StageConfig {
        mode: StageMode::Track,
        extent_cap: ExtentCap::None,
        ..StageConfig::default()
    };
    let mut engine = StageEngine::new(&config);
    engine.remeasure(
        ViewportMetrics::new(1000.0, 800.0),
        SectionMeasurement::new(0.0, 800.0, 2000.0),
    );
    engine
}

/// Timeline engine: section top 1000, height 1200, vh 800. Bounds start at
/// 200 with extent 2000; steps centered at 100/400/700/1000.
fn timeline_engine() -> StageEngine {
    let config = StageConfig {
        mode: StageMode::Timeline,
        ..StageConfig::default()
    };
    let mut engine = StageEngine::new(&config);
    engine.remeasure(
        ViewportMetrics::new(1000.0, 800.0),
        SectionMeasurement::new(1000.0, 1200.0, 1200.0),
    );
    engine.set_step_centers(vec![100.0, 400.0, 700.0, 1000.0]);
    engine
}

// =============================================================================
// TRACK PIPELINE
// =============================================================================

#[test]
fn test_track_frame_at_midpoint() {
    let mut engine = track_engine();
    let mut surface = RecordingSurface::default();

    let update = engine.sample(900.0).unwrap();
    StageEngine::apply(&update, &mut surface);

    assert_eq!(update.progress, 0.5);
    assert_eq!(surface.offsets, vec![-500.0], "offset = -progress * overflow");
    assert!(surface.fills.is_empty(), "a track frame writes no fill");
}

#[test]
fn test_no_update_before_first_measurement() {
    let config = StageConfig::default();
    let mut engine = StageEngine::new(&config);

    assert!(
        engine.sample(500.0).is_none(),
        "sampling an unmeasured engine must no-op"
    );
}

#[test]
fn test_resize_mid_scroll_uses_new_bounds() {
    // Track shrinks 2000 -> 1500 between samples (images collapsing, say).
    let mut engine = track_engine();
    let mut surface = RecordingSurface::default();

    let before = engine.sample(900.0).unwrap();
    StageEngine::apply(&before, &mut surface);

    engine.remeasure(
        ViewportMetrics::new(1000.0, 800.0),
        SectionMeasurement::new(0.0, 800.0, 1500.0),
    );
    let after = engine.sample(900.0).unwrap();
    StageEngine::apply(&after, &mut surface);

    assert_eq!(engine.bounds().unwrap().max_scroll, 500.0);
    // New extent is 800 + 500 = 1300, so progress moved too.
    assert_eq!(after.progress, 900.0 / 1300.0);
    let last = *surface.offsets.last().unwrap();
    assert!(last.is_finite(), "no NaN may reach the surface after a resize");
    assert_eq!(last, -(900.0 / 1300.0) * 500.0);
}

#[test]
fn test_reduced_motion_applies_final_state() {
    // Applying 0.3 then 0.7 must land on the exact final transform; easing is
    // the surface's concern and stays off.
    let mut engine = track_engine();
    engine.set_reduced_motion(true);
    let mut surface = RecordingSurface::default();
    surface.set_animated(!engine.reduced_motion());

    for scroll_y in [0.3_f32 * 1800.0, 0.7 * 1800.0] {
        let update = engine.sample(scroll_y).unwrap();
        StageEngine::apply(&update, &mut surface);
    }

    assert_eq!(surface.animated, Some(false));
    assert_eq!(*surface.offsets.last().unwrap(), -700.0);
    assert_eq!(engine.progress(), 0.7);
}

// =============================================================================
// TIMELINE PIPELINE
// =============================================================================

#[test]
fn test_timeline_frame_at_progress_060() {
    let mut engine = timeline_engine();
    let mut surface = RecordingSurface::default();

    // start_y = 200, extent = 2000: progress 0.6 at scroll_y 1400.
    let update = engine.sample(1400.0).unwrap();
    StageEngine::apply(&update, &mut surface);

    assert_eq!(update.progress, 0.6);
    assert_eq!(surface.fills, vec![(0.6, 720.0 - 9.0)]);
    assert_eq!(surface.revealed, vec![0, 1, 2], "fill front 720 reveals three");
    assert!(engine.step_shown(2));
    assert!(!engine.step_shown(3));
}

#[test]
fn test_timeline_reveals_fire_once() {
    let mut engine = timeline_engine();
    let mut surface = RecordingSurface::default();

    let first = engine.sample(1400.0).unwrap();
    StageEngine::apply(&first, &mut surface);
    let second = engine.sample(1400.0).unwrap();
    StageEngine::apply(&second, &mut surface);

    assert_eq!(
        surface.revealed,
        vec![0, 1, 2],
        "a re-sample at the same position must not re-reveal"
    );
}

#[test]
fn test_timeline_scroll_back_keeps_steps_shown() {
    let mut engine = timeline_engine();

    let forward = engine.sample(1400.0).unwrap();
    assert_eq!(forward.revealed, vec![0, 1, 2]);

    let back = engine.sample(200.0).unwrap();
    assert_eq!(back.progress, 0.0);
    assert!(back.revealed.is_empty());
    assert!(engine.step_shown(0), "reveals survive scrolling back to the top");
    assert_eq!(engine.shown_count(), 3);
}

#[test]
fn test_step_count_change_resets_reveals() {
    let mut engine = timeline_engine();
    engine.sample(1400.0);
    assert_eq!(engine.shown_count(), 3);

    // Same count, moved centers: state survives.
    engine.set_step_centers(vec![110.0, 410.0, 710.0, 1010.0]);
    assert_eq!(engine.shown_count(), 3, "relayout is not a step-list change");

    // Different count: everything back to Hidden.
    engine.set_step_centers(vec![100.0, 400.0, 700.0, 1000.0, 1150.0]);
    assert_eq!(engine.shown_count(), 0);
}

// =============================================================================
// NATIVE STAGE WRAPPER
// =============================================================================

#[test]
fn test_native_stage_exposes_engine() {
    let config = StageConfig {
        mode: StageMode::Track,
        extent_cap: ExtentCap::None,
        ..StageConfig::default()
    };
    let mut stage = ScrollStage::new(&config);
    stage.engine_mut().remeasure(
        ViewportMetrics::new(1000.0, 800.0),
        SectionMeasurement::new(0.0, 800.0, 2000.0),
    );

    let update = stage.engine_mut().sample(900.0).unwrap();

    assert_eq!(update.progress, 0.5);
    assert_eq!(stage.engine().progress(), 0.5);
}
