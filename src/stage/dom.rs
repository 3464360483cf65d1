//! DOM discovery and the style-writing `ProgressSurface`.
//!
//! Every write goes through `DomSurface`, the imperative-paint seam: direct
//! style mutation on the handful of elements the stage owns, bypassing any
//! host framework's render cycle. Missing elements make each write a silent
//! no-op; frame-driven code must survive partially-mounted components.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

#[cfg(target_arch = "wasm32")]
use super::{SharedState, SHOWN_ATTR, STEPS_CONTAINER_ATTR, STEP_ATTR};
#[cfg(target_arch = "wasm32")]
use crate::config::StageConfig;
#[cfg(target_arch = "wasm32")]
use crate::projector::ProgressSurface;

/// Find the first descendant carrying `attr`.
#[cfg(target_arch = "wasm32")]
pub(crate) fn find_marked(root: &HtmlElement, attr: &str) -> Option<HtmlElement> {
    root.query_selector(&format!("[{attr}]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Find every descendant carrying `attr`, in document order.
#[cfg(target_arch = "wasm32")]
pub(crate) fn find_all_marked(root: &HtmlElement, attr: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(&format!("[{attr}]")) else {
        return Vec::new();
    };
    let mut found = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list
            .get(i)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        {
            found.push(el);
        }
    }
    found
}

/// One-time style prep after binding.
///
/// Vertical panning must keep working through the sticky zone, the track gets
/// its own compositor layer, and steps start Hidden - unless reduced motion
/// is active, in which case every step is visible from the start.
#[cfg(target_arch = "wasm32")]
pub(crate) fn prepare(
    pin: Option<&HtmlElement>,
    track: Option<&HtmlElement>,
    steps: &[HtmlElement],
    animated: bool,
) {
    if let Some(pin) = pin {
        let _ = pin.style().set_property("touch-action", "pan-y");
    }
    if let Some(track) = track {
        let _ = track.style().set_property("will-change", "transform");
    }
    if animated {
        for step in steps {
            let style = step.style();
            let _ = style.set_property("opacity", "0");
            let _ = style.set_property("transform", "translateY(8px)");
        }
    }
}

/// Build step cards from config when the host markup carries none.
///
/// Cards land in the `[data-stage-steps]` container when present, otherwise
/// directly in the section. Each card is marked with `STEP_ATTR` so the
/// normal reveal path picks it up.
#[cfg(target_arch = "wasm32")]
pub(crate) fn render_steps(section: &HtmlElement, config: &StageConfig) -> Vec<HtmlElement> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let container = find_marked(section, STEPS_CONTAINER_ATTR)
        .unwrap_or_else(|| section.clone());

    if let Some(title) = &config.title {
        if let Ok(heading) = document.create_element("h2") {
            heading.set_text_content(Some(title));
            if let Some(el) = heading.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("color", &config.colors.text);
            }
            let _ = container.append_child(&heading);
        }
    }
    if let Some(subtitle) = &config.subtitle {
        if let Ok(sub) = document.create_element("p") {
            sub.set_text_content(Some(subtitle));
            if let Some(el) = sub.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("color", &config.colors.muted);
            }
            let _ = container.append_child(&sub);
        }
    }

    let mut built = Vec::with_capacity(config.steps.len());
    for step in &config.steps {
        let Ok(card) = document.create_element("article") else {
            continue;
        };
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let _ = card.set_attribute(STEP_ATTR, "");
        let style = card.style();
        let _ = style.set_property("background", &config.colors.surface);
        let _ = style.set_property("border", &format!("1px solid {}", config.colors.border));
        let _ = style.set_property("border-radius", "12px");
        let _ = style.set_property("padding", "16px");

        if let Ok(heading) = document.create_element("h3") {
            heading.set_text_content(Some(&step.title));
            if let Some(el) = heading.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("color", &config.colors.text);
            }
            let _ = card.append_child(&heading);
        }
        if let Ok(description) = document.create_element("p") {
            description.set_text_content(Some(&step.description));
            if let Some(el) = description.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("color", &config.colors.muted);
            }
            let _ = card.append_child(&description);
        }

        let _ = container.append_child(&card);
        built.push(card);
    }
    built
}

/// The DOM implementation of the paint seam.
///
/// Holds clones of the element handles so a frame can write after the shared
/// state borrow is released.
#[cfg(target_arch = "wasm32")]
pub(crate) struct DomSurface {
    track: Option<HtmlElement>,
    fill: Option<HtmlElement>,
    spark: Option<HtmlElement>,
    steps: Vec<HtmlElement>,
    fill_transition_ms: u32,
    reveal_transition_ms: u32,
}

#[cfg(target_arch = "wasm32")]
impl DomSurface {
    pub(crate) fn from_state(s: &SharedState) -> Self {
        Self {
            track: s.track.clone(),
            fill: s.fill.clone(),
            spark: s.spark.clone(),
            steps: s.steps.clone(),
            fill_transition_ms: s.config.fill_transition_ms,
            reveal_transition_ms: s.config.reveal_transition_ms,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressSurface for DomSurface {
    fn apply_track_offset(&mut self, offset_px: f32) {
        if !offset_px.is_finite() {
            return;
        }
        let Some(track) = &self.track else {
            return;
        };
        let _ = track
            .style()
            .set_property("transform", &format!("translate3d({offset_px}px,0,0)"));
    }

    fn apply_fill(&mut self, fill_frac: f32, spark_top_px: f32) {
        if !fill_frac.is_finite() || !spark_top_px.is_finite() {
            return;
        }
        if let Some(fill) = &self.fill {
            let _ = fill
                .style()
                .set_property("height", &format!("{}%", fill_frac * 100.0));
        }
        if let Some(spark) = &self.spark {
            let _ = spark
                .style()
                .set_property("top", &format!("{spark_top_px}px"));
        }
    }

    fn reveal_step(&mut self, index: usize) {
        let Some(step) = self.steps.get(index) else {
            return;
        };
        let style = step.style();
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", "none");
        let _ = step.set_attribute(SHOWN_ATTR, "");
    }

    fn set_animated(&mut self, animated: bool) {
        if let Some(fill) = &self.fill {
            let value = if animated {
                format!("height {}ms ease-out", self.fill_transition_ms)
            } else {
                "none".to_string()
            };
            let _ = fill.style().set_property("transition", &value);
        }
        if let Some(spark) = &self.spark {
            let value = if animated {
                format!("top {}ms ease-out", self.fill_transition_ms)
            } else {
                "none".to_string()
            };
            let _ = spark.style().set_property("transition", &value);
        }
        for step in &self.steps {
            let style = step.style();
            let value = if animated {
                format!(
                    "opacity {ms}ms ease, transform {ms}ms ease",
                    ms = self.reveal_transition_ms
                )
            } else {
                "none".to_string()
            };
            let _ = style.set_property("transition", &value);
            if !animated {
                // Reduced motion shows every step immediately; the engine's
                // reveal flags still track scroll for API queries.
                let _ = style.set_property("opacity", "1");
                let _ = style.set_property("transform", "none");
            }
        }
    }
}
