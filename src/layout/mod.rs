//! Layout math for pinned sections.
//!
//! This module handles:
//! - Turning batched DOM measurements into a scroll-distance budget
//! - Sampling the live scroll offset into normalized progress
//! - Clamping degenerate measurements so the frame path never divides by zero
//!
//! Everything here is pure and DOM-free; the `stage` module feeds it.

mod bounds;
mod progress;

pub use bounds::{ExtentCap, SectionBounds, SectionMeasurement, ViewportMetrics};
