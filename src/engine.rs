//! Frame pipeline: measure -> bounds -> sample -> project.
//!
//! `StageEngine` is the framework-agnostic core the binding layer drives:
//! feed it viewport/section measurements and scroll samples, then apply the
//! `FrameUpdate`s it emits through a [`ProgressSurface`]. Tests drive it the
//! same way with a recording surface instead of a DOM.

use crate::config::{StageConfig, StageMode};
use crate::layout::{ExtentCap, SectionBounds, SectionMeasurement, ViewportMetrics};
use crate::projector::{fill_position_px, FillProjection, ProgressSurface, TrackProjection};
use crate::reveal::RevealState;

/// What one frame must paint. Fields are `None`/empty when there is nothing
/// to change, so a surface never receives redundant writes.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    /// Progress sampled this frame, in [0,1]
    pub progress: f32,
    /// Track translation (horizontal variant only)
    pub track: Option<TrackProjection>,
    /// Fill bar + spark placement (vertical variant only)
    pub fill: Option<FillProjection>,
    /// Steps newly flipped to Shown this frame, ascending
    pub revealed: Vec<usize>,
}

/// Scroll-synchronized presentation engine for one pinned section.
pub struct StageEngine {
    mode: StageMode,
    extent_cap: ExtentCap,
    reveal_tolerance: f32,
    spark_size: f32,
    bounds: Option<SectionBounds>,
    container_height: f32,
    step_centers: Vec<f32>,
    reveal: RevealState,
    reduced_motion: bool,
    last_progress: f32,
}

impl StageEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: &StageConfig) -> Self {
        Self {
            mode: config.mode,
            extent_cap: config.extent_cap,
            reveal_tolerance: config.reveal_tolerance,
            spark_size: config.spark_size,
            bounds: None,
            container_height: 0.0,
            step_centers: Vec::new(),
            reveal: RevealState::new(0),
            reduced_motion: false,
            last_progress: 0.0,
        }
    }

    /// Projection variant this engine drives.
    pub fn mode(&self) -> StageMode {
        self.mode
    }

    /// Refresh bounds from a new viewport + section measurement.
    ///
    /// Called on mount, resize, orientation change, and content-size change.
    /// Progress samples taken after this use the new bounds; reveal state is
    /// untouched (a relayout is not a step-list change).
    pub fn remeasure(&mut self, metrics: ViewportMetrics, measurement: SectionMeasurement) {
        self.bounds = Some(match self.mode {
            StageMode::Track => SectionBounds::for_track(metrics, measurement, self.extent_cap),
            StageMode::Timeline => SectionBounds::for_timeline(metrics, measurement),
        });
        self.container_height = measurement.content_extent;
    }

    /// Step centers measured relative to the scrolling container.
    ///
    /// Centers move on every relayout; the reveal flags reset only when the
    /// step *count* changes, since a moved step is still the same step.
    pub fn set_step_centers(&mut self, centers: Vec<f32>) {
        if centers.len() != self.reveal.len() {
            self.reveal.reset(centers.len());
        }
        self.step_centers = centers;
    }

    /// Toggle the reduced-motion accessibility flag.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    /// Whether reduced motion is active.
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Current bounds, if a measurement has landed.
    pub fn bounds(&self) -> Option<SectionBounds> {
        self.bounds
    }

    /// Progress of the most recent sample.
    pub fn progress(&self) -> f32 {
        self.last_progress
    }

    /// Whether step `index` has been revealed.
    pub fn step_shown(&self, index: usize) -> bool {
        self.reveal.is_shown(index)
    }

    /// Number of steps currently shown.
    pub fn shown_count(&self) -> usize {
        self.reveal.shown_count()
    }

    /// Sample the document scroll offset and produce the frame's updates.
    ///
    /// Returns `None` until the first measurement lands - the defensive no-op
    /// path for partially-mounted components.
    pub fn sample(&mut self, scroll_y: f32) -> Option<FrameUpdate> {
        let bounds = self.bounds?;
        let progress = bounds.progress_at(scroll_y);
        self.last_progress = progress;

        let mut update = FrameUpdate {
            progress,
            track: None,
            fill: None,
            revealed: Vec::new(),
        };
        match self.mode {
            StageMode::Track => {
                update.track = TrackProjection::project(progress, bounds.max_scroll);
            }
            StageMode::Timeline => {
                update.fill =
                    FillProjection::project(progress, self.container_height, self.spark_size);
                update.revealed = self.reveal.observe(
                    fill_position_px(progress, self.container_height),
                    &self.step_centers,
                    self.reveal_tolerance,
                );
            }
        }
        Some(update)
    }

    /// Write a frame update through a surface.
    pub fn apply(update: &FrameUpdate, surface: &mut dyn ProgressSurface) {
        if let Some(track) = update.track {
            surface.apply_track_offset(track.offset_px);
        }
        if let Some(fill) = update.fill {
            surface.apply_fill(fill.fill_frac, fill.spark_top_px);
        }
        for &index in &update.revealed {
            surface.reveal_step(index);
        }
    }
}
