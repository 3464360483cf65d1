//! One-way step reveal state for timeline sections.
//!
//! Each step is a two-state machine: Hidden -> Shown, fired once when the fill
//! front passes the step's vertical center. There is no reverse transition;
//! scrolling back up leaves shown steps shown. The whole list resets to
//! Hidden only when the step list itself changes.

/// Reveal flags for an ordered list of timeline steps.
#[derive(Debug, Clone)]
pub struct RevealState {
    shown: Vec<bool>,
}

impl RevealState {
    /// All steps start Hidden.
    pub fn new(step_count: usize) -> Self {
        Self {
            shown: vec![false; step_count],
        }
    }

    /// Number of steps tracked.
    pub fn len(&self) -> usize {
        self.shown.len()
    }

    /// True when no steps are tracked.
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Whether step `index` has been revealed.
    pub fn is_shown(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    /// Number of steps currently shown.
    pub fn shown_count(&self) -> usize {
        self.shown.iter().filter(|s| **s).count()
    }

    /// Evaluate the reveal rule for the current fill front position.
    ///
    /// Step `i` reveals when `fill_position_px >= centers[i] - tolerance_px`;
    /// the tolerance lets the reveal fire slightly before exact pixel
    /// alignment. Returns the newly revealed indices in ascending order;
    /// already-shown steps are untouched no matter the fill position, so
    /// re-evaluating is idempotent and callers can skip style writes when the
    /// result is empty.
    pub fn observe(
        &mut self,
        fill_position_px: f32,
        centers: &[f32],
        tolerance_px: f32,
    ) -> Vec<usize> {
        if !fill_position_px.is_finite() {
            return Vec::new();
        }
        let mut revealed = Vec::new();
        for (index, shown) in self.shown.iter_mut().enumerate() {
            if *shown {
                continue;
            }
            let Some(center) = centers.get(index).copied() else {
                continue;
            };
            if !center.is_finite() {
                continue;
            }
            if fill_position_px >= center - tolerance_px {
                *shown = true;
                revealed.push(index);
            }
        }
        revealed
    }

    /// Step list changed: every step back to Hidden.
    pub fn reset(&mut self, step_count: usize) {
        self.shown.clear();
        self.shown.resize(step_count, false);
    }
}
