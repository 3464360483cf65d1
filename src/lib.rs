//! scrollstage - scroll-synchronized presentation engine for the web
//!
//! Drives pinned-section visuals from the page's vertical scroll via
//! WebAssembly:
//! - Horizontal product tracks translated by scroll progress
//! - Timeline fill bars with one-way step reveals
//! - Reduced-motion aware, coalesced to one update per animation frame
//! - No framework dependency; binds to plain DOM via `data-stage-*` markers
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ScrollStage } from 'scrollstage';
//! await init();
//! const stage = new ScrollStage(section, { mode: 'track' });
//! // on teardown:
//! stage.detach();
//! ```

// Engine modules (pure, DOM-free)
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod projector;
pub mod reveal;

// Browser binding modules
pub mod stage;
pub mod theme;

use wasm_bindgen::prelude::*;

// Re-export the main stage struct
pub use stage::ScrollStage;

pub use config::{ColorTokens, StageConfig, StageMode, StepContent};
pub use engine::{FrameUpdate, StageEngine};
pub use layout::{ExtentCap, SectionBounds, SectionMeasurement, ViewportMetrics};
pub use projector::{FillProjection, ProgressSurface, TrackProjection};
pub use reveal::RevealState;

/// Parse and validate a stage configuration, returning the normalized form
/// (defaults filled in) as a `JsValue`.
///
/// Lets hosts fail fast on a bad config without constructing a stage.
///
/// # Errors
/// Returns an error if the value does not deserialize into a `StageConfig`
/// or fails range validation.
#[wasm_bindgen(js_name = "validateConfig")]
pub fn validate_config(config: JsValue) -> Result<JsValue, JsValue> {
    let config: StageConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid stage config: {e}")))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&config)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
