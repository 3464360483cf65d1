//! Stage configuration.
//!
//! One parameterized configuration drives every stage variant: title,
//! subtitle, step list, and color tokens are data, not component forks.

use serde::{Deserialize, Serialize};

use crate::layout::ExtentCap;

/// Which projection a stage drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageMode {
    /// Wide horizontal content track translated by vertical scroll
    Track,
    /// Vertical fill bar with one-way step reveals
    Timeline,
}

/// Content and behavior parameters for one stage instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageConfig {
    /// Projection variant
    pub mode: StageMode,
    /// Cap on the extra scroll distance a pinned track may consume
    pub extent_cap: ExtentCap,
    /// Early-fire tolerance for step reveals, px
    pub reveal_tolerance: f32,
    /// Diameter of the spark indicator, px
    pub spark_size: f32,
    /// Transition length for fill/spark motion, ms
    pub fill_transition_ms: u32,
    /// Transition length for step reveals, ms
    pub reveal_transition_ms: u32,
    /// Heading shown above the stage (host-rendered; carried for step builds)
    pub title: Option<String>,
    /// Subheading shown under the title
    pub subtitle: Option<String>,
    /// Timeline step content, in display order
    pub steps: Vec<StepContent>,
    /// Color tokens applied to stage-built step cards
    pub colors: ColorTokens,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            mode: StageMode::Track,
            extent_cap: ExtentCap::default(),
            reveal_tolerance: 8.0,
            spark_size: 18.0,
            fill_transition_ms: 120,
            reveal_transition_ms: 420,
            title: None,
            subtitle: None,
            steps: Vec::new(),
            colors: ColorTokens::default(),
        }
    }
}

impl StageConfig {
    /// Validate ranges that would otherwise produce nonsense styles.
    ///
    /// # Errors
    /// Returns an error when a pixel field is negative or non-finite.
    pub fn validate(&self) -> crate::error::Result<()> {
        for (name, value) in [
            ("revealTolerance", self.reveal_tolerance),
            ("sparkSize", self.spark_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::error::StageError::Config(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        if let ExtentCap::MaxTravel(cap) = self.extent_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(crate::error::StageError::Config(format!(
                    "extentCap must be a non-negative finite number, got {cap}"
                )));
            }
        }
        Ok(())
    }
}

/// One timeline step's copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepContent {
    pub title: String,
    pub description: String,
}

/// Color tokens for stage-built DOM (step cards, connectors).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorTokens {
    pub surface: String,
    pub border: String,
    pub text: String,
    pub muted: String,
    pub accent: String,
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            surface: "#ffffff".to_string(),
            border: "#e5e7eb".to_string(),
            text: "#111827".to_string(),
            muted: "#6b7280".to_string(),
            accent: "#a78bfa".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json_defaults() {
        let config: StageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.mode, StageMode::Track);
        assert_eq!(config.reveal_tolerance, 8.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_timeline_with_steps() {
        let config: StageConfig = serde_json::from_str(
            r#"{
                "mode": "timeline",
                "steps": [
                    { "title": "Blazing VPS", "description": "Instant provision" },
                    { "title": "Domains", "description": "Easy DNS" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.mode, StageMode::Timeline);
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.steps[0].title, "Blazing VPS");
    }

    #[test]
    fn test_config_rejects_negative_tolerance() {
        let config = StageConfig {
            reveal_tolerance: -1.0,
            ..StageConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
