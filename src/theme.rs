//! Light/dark theme preference - the crate's only persisted state.
//!
//! The flag lives in `localStorage`; when absent, the system
//! `prefers-color-scheme` setting decides.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// `localStorage` key holding the persisted flag.
pub const STORAGE_KEY: &str = "scrollstage.theme";

/// The persisted theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    /// Stable string form, matching what `parse` accepts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored flag. Unknown values yield `None` so a corrupt entry
    /// falls back to the system preference.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Resolve the effective preference: persisted flag first, then the system
/// `prefers-color-scheme` setting, then light.
#[cfg(target_arch = "wasm32")]
pub fn load() -> ThemePreference {
    stored().unwrap_or_else(system_default)
}

/// Persist the flag. Storage failures (private browsing, quota) are swallowed;
/// the preference simply won't survive the session.
#[cfg(target_arch = "wasm32")]
pub fn store(preference: ThemePreference) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };
    let _ = storage.set_item(STORAGE_KEY, preference.as_str());
}

#[cfg(target_arch = "wasm32")]
fn stored() -> Option<ThemePreference> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(STORAGE_KEY).ok()??;
    ThemePreference::parse(&value)
}

#[cfg(target_arch = "wasm32")]
fn system_default() -> ThemePreference {
    let Some(window) = web_sys::window() else {
        return ThemePreference::Light;
    };
    match window.match_media("(prefers-color-scheme: dark)") {
        Ok(Some(query)) if query.matches() => ThemePreference::Dark,
        _ => ThemePreference::Light,
    }
}

/// Resolve the effective theme as a string for JavaScript hosts.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = "preferredTheme")]
#[must_use]
pub fn preferred_theme() -> String {
    load().as_str().to_string()
}

/// Persist a theme flag from JavaScript.
///
/// # Errors
/// Returns an error for values other than `"light"` or `"dark"`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = "persistTheme")]
pub fn persist_theme(value: &str) -> Result<(), JsValue> {
    let preference = ThemePreference::parse(value)
        .ok_or_else(|| JsValue::from_str(&format!("unknown theme: {value}")))?;
    store(preference);
    Ok(())
}
