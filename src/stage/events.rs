//! Scroll, relayout, and frame scheduling for `ScrollStage`.
//!
//! All methods here are `pub(crate)` helpers called from the wasm-exported
//! public API that lives in `mod.rs`. Handlers never touch styles directly:
//! a scroll only requests an animation frame, and the frame batches every
//! layout read before any style write.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use super::{dom, ScrollStage, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::config::StageMode;
#[cfg(target_arch = "wasm32")]
use crate::engine::StageEngine;
#[cfg(target_arch = "wasm32")]
use crate::layout::{SectionMeasurement, ViewportMetrics};
#[cfg(target_arch = "wasm32")]
use crate::projector::ProgressSurface;

#[cfg(target_arch = "wasm32")]
impl ScrollStage {
    /// Scroll notification: queue a frame. The sample itself happens inside
    /// the frame so a burst of scroll events costs one cycle per paint.
    pub(crate) fn internal_scroll(state: &Rc<RefCell<SharedState>>) {
        Self::request_frame(state);
    }

    /// Viewport or content size changed: re-measure, then repaint.
    pub(crate) fn internal_relayout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // Batch every layout read up front.
        let viewport_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let viewport_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;

        let mut s = state.borrow_mut();
        if s.detached {
            return;
        }
        let section_rect = s.section.get_bounding_client_rect();
        let section_top = section_rect.top() as f32 + scroll_y;
        let section_height = section_rect.height() as f32;
        let content_extent = match s.engine.mode() {
            // Natural, unclipped track width; zero before first layout.
            StageMode::Track => s
                .track
                .as_ref()
                .map(|track| track.scroll_width() as f32)
                .unwrap_or(0.0),
            StageMode::Timeline => section_height,
        };
        let centers: Vec<f32> = s
            .steps
            .iter()
            .map(|step| {
                let rect = step.get_bounding_client_rect();
                (rect.top() - section_rect.top() + rect.height() / 2.0) as f32
            })
            .collect();

        let metrics = ViewportMetrics::new(viewport_w, viewport_h);
        s.engine.remeasure(
            metrics,
            SectionMeasurement::new(section_top, section_height, content_extent),
        );
        s.engine.set_step_centers(centers);

        // Reads done. The only relayout-time write is the pinned section's
        // height, sizing the sticky zone to exactly the scroll budget.
        if s.engine.mode() == StageMode::Track {
            if let Some(bounds) = s.engine.bounds() {
                if bounds.pinned_extent.is_finite() {
                    let _ = s
                        .section
                        .style()
                        .set_property("height", &format!("{}px", bounds.pinned_extent));
                }
            }
        }
        drop(s);
        Self::request_frame(state);
    }

    /// Reduced-motion preference flipped.
    pub(crate) fn internal_motion_change(state: &Rc<RefCell<SharedState>>, reduced: bool) {
        let mut surface = {
            let mut s = state.borrow_mut();
            s.engine.set_reduced_motion(reduced);
            s.animated = !reduced;
            dom::DomSurface::from_state(&s)
        };
        surface.set_animated(!reduced);
        // Repaint so the correct final values land without easing.
        Self::request_frame(state);
    }

    /// Queue the frame callback unless one is already pending.
    pub(crate) fn request_frame(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.frame_pending || s.detached {
            return;
        }
        if s.raf_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    ScrollStage::run_frame(&state);
                }
            }) as Box<dyn FnMut()>);
            s.raf_closure = Some(closure);
        }
        let Some(callback) = s.raf_closure.as_ref() else {
            return;
        };
        if window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .is_ok()
        {
            s.frame_pending = true;
        }
    }

    /// One measure->compute->apply cycle. Sampling and projection happen under
    /// the borrow; style writes happen after it is released, so a write that
    /// synchronously re-enters an event handler cannot deadlock the state.
    pub(crate) fn run_frame(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
        let (update, mut surface) = {
            let mut s = state.borrow_mut();
            s.frame_pending = false;
            if s.detached {
                return;
            }
            let Some(update) = s.engine.sample(scroll_y) else {
                return;
            };
            (update, dom::DomSurface::from_state(&s))
        };
        StageEngine::apply(&update, &mut surface);
    }
}
