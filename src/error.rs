//! Structured error types for scrollstage.
//!
//! Only construction-time failures are errors; the per-frame path degrades to
//! "no visual motion" instead of failing (see `projector`).

/// All errors that can occur while binding or configuring a stage.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// A required DOM element is missing or has an unexpected type.
    #[error("DOM binding: {0}")]
    Dom(String),

    /// Invalid stage configuration.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StageError>;

impl From<String> for StageError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for StageError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<StageError> for wasm_bindgen::JsValue {
    fn from(e: StageError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
