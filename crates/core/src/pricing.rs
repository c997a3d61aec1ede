//! Model identifiers and per-action pricing.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Model identifiers
// ---------------------------------------------------------------------------

/// Text model used for concept writing and image quality analysis.
pub const TEXT_MODEL: &str = "gemini-2.0-flash";

/// Image model behind the "fast" tier.
pub const FAST_IMAGE_MODEL: &str = "gemini-2.5-flash-preview-04-17";

/// Image model behind the "hd" tier.
pub const HD_IMAGE_MODEL: &str = "imagen-3.0-generate-001";

// ---------------------------------------------------------------------------
// Costs (currency units per action)
// ---------------------------------------------------------------------------

/// Flat cost logged for one concept-generation batch.
pub const CONCEPT_BATCH_COST: f64 = 0.01;

/// Cost per thumbnail in fast mode.
pub const FAST_COST_PER_IMAGE: f64 = 0.05;

/// Cost per thumbnail in hd mode.
pub const HD_COST_PER_IMAGE: f64 = 0.24;

// ---------------------------------------------------------------------------
// Quality mode
// ---------------------------------------------------------------------------

/// Image-generation tier selecting cost, model, and output fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityMode {
    Fast,
    Hd,
}

impl QualityMode {
    /// Parse from the wire value (`"fast"` or `"hd"`).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "fast" => Ok(Self::Fast),
            "hd" => Ok(Self::Hd),
            other => Err(CoreError::Validation(format!(
                "Invalid quality mode '{other}'. Must be one of: fast, hd"
            ))),
        }
    }

    /// Wire / database label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Hd => "hd",
        }
    }

    /// Model identifier invoked for this tier.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::Fast => FAST_IMAGE_MODEL,
            Self::Hd => HD_IMAGE_MODEL,
        }
    }

    /// Cost charged per successfully generated image.
    pub fn cost_per_image(self) -> f64 {
        match self {
            Self::Fast => FAST_COST_PER_IMAGE,
            Self::Hd => HD_COST_PER_IMAGE,
        }
    }

    /// Output edge length in pixels (square renders).
    pub fn output_size(self) -> u32 {
        match self {
            Self::Fast => 512,
            Self::Hd => 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!(QualityMode::from_name("fast").unwrap(), QualityMode::Fast);
        assert_eq!(QualityMode::from_name("hd").unwrap(), QualityMode::Hd);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(QualityMode::from_name("ultra").is_err());
    }

    #[test]
    fn label_round_trips() {
        for mode in [QualityMode::Fast, QualityMode::Hd] {
            assert_eq!(QualityMode::from_name(mode.label()).unwrap(), mode);
        }
    }

    #[test]
    fn hd_costs_more_than_fast() {
        assert!(QualityMode::Hd.cost_per_image() > QualityMode::Fast.cost_per_image());
    }
}
