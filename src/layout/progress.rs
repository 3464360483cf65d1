//! Scroll-to-progress sampling.

use super::SectionBounds;

impl SectionBounds {
    /// Normalized progress for a document scroll offset.
    ///
    /// Monotonic non-decreasing in `scroll_y` for fixed bounds, and decreases
    /// again when the user scrolls back up (unlike step reveals, which are
    /// one-way). The denominator is clamped to at least 1px so degenerate
    /// measurements can never divide by zero; a non-finite sample maps to 0.
    pub fn progress_at(&self, scroll_y: f32) -> f32 {
        if !scroll_y.is_finite() {
            return 0.0;
        }
        ((scroll_y - self.start_y) / self.pinned_extent.max(1.0)).clamp(0.0, 1.0)
    }
}
