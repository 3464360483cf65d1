//! Section bounds derivation.
//!
//! Converts batched layout measurements of a pinned section into the vertical
//! scroll budget over which its progress runs 0->1. All constructors are pure
//! functions of their inputs; callers re-invoke them on mount (after first
//! paint, since natural content width may be zero before layout), on window
//! resize, on orientation change, and whenever the observed content size
//! changes.

/// Current viewport dimensions, refreshed on resize/orientation change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Viewport width in CSS pixels
    pub width: f32,
    /// Viewport height in CSS pixels
    pub height: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ViewportMetrics {
    /// Create viewport metrics, sanitizing non-finite or negative inputs to 0.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: finite_or_zero(width).max(0.0),
            height: finite_or_zero(height).max(0.0),
        }
    }
}

/// Raw layout reads for one section.
///
/// The stage batches every `getBoundingClientRect`/`scrollWidth` read into one
/// of these before any style write happens, so a frame never alternates reads
/// and writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMeasurement {
    /// Document-relative offset of the section's top edge
    pub section_top: f32,
    /// Measured height of the section
    pub section_height: f32,
    /// Natural, unclipped extent of the inner content: track width for the
    /// horizontal variant, container height for the vertical one
    pub content_extent: f32,
}

impl SectionMeasurement {
    /// Create a measurement, sanitizing non-finite inputs to 0.
    pub fn new(section_top: f32, section_height: f32, content_extent: f32) -> Self {
        Self {
            section_top: finite_or_zero(section_top),
            section_height: finite_or_zero(section_height).max(0.0),
            content_extent: finite_or_zero(content_extent).max(0.0),
        }
    }
}

/// Upper bound on the extra scroll distance a pinned track section may consume.
///
/// A very wide track would otherwise pin the viewport for its full overflow;
/// capping the travel shortens the ride without clipping content (the track
/// still translates through its full overflow, just faster). This is UX
/// policy, not a technical constraint, so it is configurable per stage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtentCap {
    /// No cap; consumed scroll equals the full horizontal overflow
    None,
    /// Cap the consumed scroll distance at the given number of pixels
    MaxTravel(f32),
}

impl Default for ExtentCap {
    fn default() -> Self {
        // Longest ride a showcase should demand regardless of content width.
        Self::MaxTravel(1400.0)
    }
}

impl ExtentCap {
    /// Apply the cap to a travel distance.
    pub fn apply(self, travel: f32) -> f32 {
        match self {
            Self::None => travel,
            Self::MaxTravel(cap) => travel.min(finite_or_zero(cap).max(0.0)),
        }
    }
}

/// Scroll-distance budget for a pinned section.
///
/// One convention for both variants (see `progress_at`):
///
/// ```text
/// progress = clamp((scroll_y - start_y) / max(1, pinned_extent), 0, 1)
/// ```
///
/// The variants differ only in `start_y`: a track pins when its section top
/// reaches the viewport top, a timeline starts when its section top enters
/// the viewport bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    /// Scroll offset at which progress leaves 0
    pub start_y: f32,
    /// Vertical scroll distance over which progress runs 0->1
    pub pinned_extent: f32,
    /// Horizontal overflow of the track (0 for the vertical variant)
    pub max_scroll: f32,
}

impl SectionBounds {
    /// Bounds for a horizontally scrolled track section.
    ///
    /// `max_scroll = max(0, track_width - viewport_width)`; the pinned extent
    /// is the viewport height plus the (capped) travel. A track narrower than
    /// the viewport yields `max_scroll = 0` and the extent collapses to the
    /// viewport height alone, so the section never traps the user in a dead
    /// pinned zone.
    pub fn for_track(
        metrics: ViewportMetrics,
        measurement: SectionMeasurement,
        cap: ExtentCap,
    ) -> Self {
        let max_scroll = (measurement.content_extent - metrics.width).max(0.0);
        let travel = cap.apply(max_scroll);
        Self {
            start_y: measurement.section_top,
            pinned_extent: metrics.height + travel,
            max_scroll,
        }
    }

    /// Bounds for a vertical timeline section.
    ///
    /// Progress runs from "section top entering the viewport" to "section
    /// bottom leaving the viewport", so the extent is the section height plus
    /// the viewport height.
    pub fn for_timeline(metrics: ViewportMetrics, measurement: SectionMeasurement) -> Self {
        Self {
            start_y: measurement.section_top - metrics.height,
            pinned_extent: measurement.section_height + metrics.height,
            max_scroll: 0.0,
        }
    }

    /// Scroll offset at which progress saturates at 1.
    pub fn end_y(&self) -> f32 {
        self.start_y + self.pinned_extent
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
