//! Step reveal state machine tests
//!
//! Reveals are one-way and idempotent: once Shown, a step never reverts, and
//! re-observing a shown step reports no change so callers can skip style
//! writes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use scrollstage::RevealState;

const CENTERS: [f32; 4] = [100.0, 400.0, 700.0, 1000.0];
const TOLERANCE: f32 = 8.0;

// =============================================================================
// REVEAL RULE
// =============================================================================

#[test]
fn test_scenario_progress_060() {
    // Container 1200, progress 0.6 -> fill front at 720. Steps at
    // 100/400/700 reveal (720 >= center - 8), step at 1000 stays hidden.
    let mut reveal = RevealState::new(4);

    let revealed = reveal.observe(720.0, &CENTERS, TOLERANCE);

    assert_eq!(revealed, vec![0, 1, 2]);
    assert!(reveal.is_shown(0));
    assert!(reveal.is_shown(1));
    assert!(reveal.is_shown(2));
    assert!(!reveal.is_shown(3), "step at 1000 needs fill >= 992");
    assert_eq!(reveal.shown_count(), 3);
}

#[test]
fn test_tolerance_boundary() {
    let mut reveal = RevealState::new(4);

    // 100 - 8 = 92 is the exact firing line.
    assert!(reveal.observe(91.9, &CENTERS, TOLERANCE).is_empty());
    assert_eq!(reveal.observe(92.0, &CENTERS, TOLERANCE), vec![0]);
}

#[test]
fn test_incremental_reveal_order() {
    let mut reveal = RevealState::new(4);

    assert_eq!(reveal.observe(95.0, &CENTERS, TOLERANCE), vec![0]);
    assert_eq!(reveal.observe(400.0, &CENTERS, TOLERANCE), vec![1]);
    assert_eq!(reveal.observe(1200.0, &CENTERS, TOLERANCE), vec![2, 3]);
}

// =============================================================================
// ONE-WAY AND IDEMPOTENT
// =============================================================================

#[test]
fn test_no_revert_on_scroll_back() {
    let mut reveal = RevealState::new(4);
    reveal.observe(720.0, &CENTERS, TOLERANCE);

    // Fill front back at 0: nothing changes, nothing reverts.
    let revealed = reveal.observe(0.0, &CENTERS, TOLERANCE);

    assert!(revealed.is_empty());
    assert!(reveal.is_shown(0), "shown steps stay shown at any fill position");
    assert!(reveal.is_shown(2));
}

#[test]
fn test_reobserve_is_noop() {
    let mut reveal = RevealState::new(4);

    assert_eq!(reveal.observe(720.0, &CENTERS, TOLERANCE).len(), 3);
    assert!(
        reveal.observe(720.0, &CENTERS, TOLERANCE).is_empty(),
        "re-evaluating shown steps must report no change"
    );
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn test_reset_on_step_list_change() {
    let mut reveal = RevealState::new(4);
    reveal.observe(1200.0, &CENTERS, TOLERANCE);
    assert_eq!(reveal.shown_count(), 4);

    reveal.reset(6);

    assert_eq!(reveal.len(), 6);
    assert_eq!(reveal.shown_count(), 0, "all steps back to Hidden");
}

#[test]
fn test_missing_center_never_reveals() {
    // More steps than measured centers: the unmeasured tail stays hidden.
    let mut reveal = RevealState::new(6);

    let revealed = reveal.observe(10_000.0, &CENTERS, TOLERANCE);

    assert_eq!(revealed, vec![0, 1, 2, 3]);
    assert!(!reveal.is_shown(4));
    assert!(!reveal.is_shown(5));
}

#[test]
fn test_non_finite_fill_is_noop() {
    let mut reveal = RevealState::new(4);

    assert!(reveal.observe(f32::NAN, &CENTERS, TOLERANCE).is_empty());
    assert_eq!(reveal.shown_count(), 0);
}

#[test]
fn test_non_finite_center_skipped() {
    let mut reveal = RevealState::new(3);
    let centers = [100.0, f32::NAN, 300.0];

    let revealed = reveal.observe(500.0, &centers, TOLERANCE);

    assert_eq!(revealed, vec![0, 2], "a NaN center must not fire");
}

#[test]
fn test_empty_state() {
    let mut reveal = RevealState::new(0);
    assert!(reveal.is_empty());
    assert!(reveal.observe(500.0, &CENTERS, TOLERANCE).is_empty());
    assert!(!reveal.is_shown(0), "out-of-range index reads as hidden");
}
