//! Main `ScrollStage` struct - the wasm-exported binding layer.
//!
//! This module provides the `ScrollStage` struct that handles:
//! - Discovering pin/track/fill/spark/step elements via `data-stage-*` markers
//! - Registering scroll/resize/orientation listeners and a ResizeObserver
//! - Tracking the reduced-motion media preference
//! - Coalescing the measure->compute->apply cycle to one run per animation frame
//!
//! Listeners are registered when the stage is created and removed by
//! `detach()` - DOM wiring beyond the marker attributes is not required.

mod dom;
mod events;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{
    AddEventListenerOptions, HtmlElement, MediaQueryList, MediaQueryListEvent, ResizeObserver,
};

use crate::config::StageConfig;
#[cfg(target_arch = "wasm32")]
use crate::config::StageMode;
use crate::engine::StageEngine;
#[cfg(target_arch = "wasm32")]
use crate::error::StageError;
#[cfg(target_arch = "wasm32")]
use crate::projector::ProgressSurface;

/// Marker attribute for the sticky pin element inside the section root.
pub const PIN_ATTR: &str = "data-stage-pin";
/// Marker attribute for the horizontal content track.
pub const TRACK_ATTR: &str = "data-stage-track";
/// Marker attribute for the timeline fill bar.
pub const FILL_ATTR: &str = "data-stage-fill";
/// Marker attribute for the spark indicator riding the fill front.
pub const SPARK_ATTR: &str = "data-stage-spark";
/// Marker attribute for one timeline step.
pub const STEP_ATTR: &str = "data-stage-step";
/// Marker attribute for the container stage-built steps are appended to.
pub const STEPS_CONTAINER_ATTR: &str = "data-stage-steps";
/// Attribute set on a step once revealed (host CSS hook).
pub const SHOWN_ATTR: &str = "data-stage-shown";

/// Media query controlling the animation switch.
#[cfg(target_arch = "wasm32")]
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) engine: StageEngine,
    pub(crate) config: StageConfig,
    pub(crate) section: HtmlElement,
    pub(crate) pin: Option<HtmlElement>,
    pub(crate) track: Option<HtmlElement>,
    pub(crate) fill: Option<HtmlElement>,
    pub(crate) spark: Option<HtmlElement>,
    pub(crate) steps: Vec<HtmlElement>,
    /// True while a requestAnimationFrame callback is queued; keeps the
    /// measure->compute->apply cycle to at most one run per paint.
    pub(crate) frame_pending: bool,
    pub(crate) raf_closure: Option<Closure<dyn FnMut()>>,
    /// False under reduced motion: transforms still apply, easing does not.
    pub(crate) animated: bool,
    /// Set by `detach()`; turns queued frame callbacks into no-ops.
    pub(crate) detached: bool,
}

/// The stage binding exported to JavaScript
#[wasm_bindgen]
pub struct ScrollStage {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    relayout_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    motion_closure: Option<Closure<dyn FnMut(MediaQueryListEvent)>>,
    #[cfg(target_arch = "wasm32")]
    motion_query: Option<MediaQueryList>,
    #[cfg(target_arch = "wasm32")]
    resize_observer: Option<ResizeObserver>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    observer_closure: Option<Closure<dyn FnMut()>>,
    #[cfg(target_arch = "wasm32")]
    detached: bool,

    // Non-wasm32 fields
    #[cfg(not(target_arch = "wasm32"))]
    engine: StageEngine,
    #[cfg(not(target_arch = "wasm32"))]
    #[allow(dead_code)]
    config: StageConfig,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl ScrollStage {
    /// Bind a stage to a section root element.
    ///
    /// Discovers child elements by their `data-stage-*` markers, registers all
    /// listeners, and performs the initial measurement. `config` may be
    /// `undefined`/`null` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(section: HtmlElement, config: JsValue) -> Result<ScrollStage, JsValue> {
        console_error_panic_hook::set_once();

        let config: StageConfig = if config.is_undefined() || config.is_null() {
            StageConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("invalid stage config: {e}")))?
        };
        config.validate().map_err(JsValue::from)?;

        let pin = dom::find_marked(&section, PIN_ATTR);
        let track = dom::find_marked(&section, TRACK_ATTR);
        let fill = dom::find_marked(&section, FILL_ATTR);
        let spark = dom::find_marked(&section, SPARK_ATTR);
        let mut steps = dom::find_all_marked(&section, STEP_ATTR);

        match config.mode {
            StageMode::Track => {
                if track.is_none() {
                    return Err(StageError::Dom(format!(
                        "track stage needs a [{TRACK_ATTR}] element"
                    ))
                    .into());
                }
            }
            StageMode::Timeline => {
                // Host markup without pre-rendered steps: build cards from config.
                if steps.is_empty() && !config.steps.is_empty() {
                    steps = dom::render_steps(&section, &config);
                }
            }
        }

        let engine = StageEngine::new(&config);
        let state = Rc::new(RefCell::new(SharedState {
            engine,
            config,
            section,
            pin,
            track,
            fill,
            spark,
            steps,
            frame_pending: false,
            raf_closure: None,
            animated: true,
            detached: false,
        }));

        // Reduced motion: read the current preference, then follow changes.
        let motion_query = web_sys::window()
            .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok())
            .flatten();
        if let Some(query) = &motion_query {
            let mut s = state.borrow_mut();
            s.engine.set_reduced_motion(query.matches());
            s.animated = !query.matches();
        }
        let motion_closure = motion_query.as_ref().map(|query| {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
                Self::internal_motion_change(&state, event.matches());
            }) as Box<dyn FnMut(MediaQueryListEvent)>);
            let _ = query
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure
        });

        // One-time style prep, then transitions to match the motion preference.
        {
            let s = state.borrow();
            dom::prepare(s.pin.as_ref(), s.track.as_ref(), &s.steps, s.animated);
            let animated = s.animated;
            let mut surface = dom::DomSurface::from_state(&s);
            drop(s);
            surface.set_animated(animated);
        }

        // Scroll listener on the window, passive: the handler only requests a
        // frame, it never calls preventDefault.
        let scroll_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                Self::internal_scroll(&state);
            }) as Box<dyn FnMut(web_sys::Event)>);
            if let Some(window) = web_sys::window() {
                let options = AddEventListenerOptions::new();
                options.set_passive(true);
                let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                    "scroll",
                    closure.as_ref().unchecked_ref(),
                    &options,
                );
            }
            Some(closure)
        };

        // Resize and orientation change share one relayout handler.
        let relayout_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                Self::internal_relayout(&state);
            }) as Box<dyn FnMut(web_sys::Event)>);
            if let Some(window) = web_sys::window() {
                let _ = window.add_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
                let _ = window.add_event_listener_with_callback(
                    "orientationchange",
                    closure.as_ref().unchecked_ref(),
                );
            }
            Some(closure)
        };

        // ResizeObserver catches content-size changes the window events miss
        // (images loading into the track, font swaps growing the timeline).
        let (observer_closure, resize_observer) = {
            let weak_state = Rc::downgrade(&state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    ScrollStage::internal_relayout(&state);
                }
            }) as Box<dyn FnMut()>);
            let observer = ResizeObserver::new(closure.as_ref().unchecked_ref()).ok();
            if let Some(observer) = &observer {
                if let Some(root) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.document_element())
                {
                    observer.observe(&root);
                }
                let s = state.borrow();
                // Observe the track's own size in track mode; in timeline mode
                // the section is safe to watch because relayout never writes
                // its height there.
                match s.track.as_ref() {
                    Some(track) => observer.observe(track),
                    None => observer.observe(&s.section),
                }
            }
            (Some(closure), observer)
        };

        // Initial measurement. Content may still be mid-layout; the observer
        // delivers a follow-up once sizes settle.
        Self::internal_relayout(&state);

        Ok(ScrollStage {
            state,
            scroll_closure,
            relayout_closure,
            motion_closure,
            motion_query,
            resize_observer,
            observer_closure,
            detached: false,
        })
    }

    /// Re-measure and repaint. Hosts call this after mutating stage content
    /// outside the observed elements.
    pub fn refresh(&self) {
        Self::internal_relayout(&self.state);
    }

    /// Progress of the most recent sample, in [0,1].
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.state.borrow().engine.progress()
    }

    /// Whether timeline step `index` has been revealed.
    #[must_use]
    pub fn step_shown(&self, index: usize) -> bool {
        self.state.borrow().engine.step_shown(index)
    }

    /// Whether the reduced-motion preference is active.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.state.borrow().engine.reduced_motion()
    }

    /// Remove every listener and observer this stage registered.
    ///
    /// The stage is inert afterwards; queued animation frames become no-ops.
    /// Idempotent.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.state.borrow_mut().detached = true;

        if let Some(window) = web_sys::window() {
            if let Some(closure) = &self.scroll_closure {
                let _ = window.remove_event_listener_with_callback(
                    "scroll",
                    closure.as_ref().unchecked_ref(),
                );
            }
            if let Some(closure) = &self.relayout_closure {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "orientationchange",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
        if let (Some(query), Some(closure)) = (&self.motion_query, &self.motion_closure) {
            let _ = query
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }
        if let Some(observer) = &self.resize_observer {
            observer.disconnect();
        }
    }
}

// ============================================================================
// Non-WASM32 Implementation (native tests and non-browser hosts)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl ScrollStage {
    /// Build a stage around a bare engine, no DOM attached.
    pub fn new(config: &StageConfig) -> Self {
        Self {
            engine: StageEngine::new(config),
            config: config.clone(),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &StageEngine {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut StageEngine {
        &mut self.engine
    }
}
