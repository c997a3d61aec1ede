//! Reference-photo quality analysis: response shape, fallbacks, clamping.

use serde::Deserialize;

/// Score assigned when the caller supplied pre-uploaded references and no
/// analysis call runs.
pub const DIRECT_UPLOAD_SCORE: f64 = 0.8;

/// Notes recorded for pre-uploaded references.
pub const DIRECT_UPLOAD_NOTES: &str = "Uploaded directly";

/// Score assigned when the analysis call or its parsing fails.
pub const FALLBACK_SCORE: f64 = 0.5;

/// Notes recorded when analysis fails. The upload itself still succeeds.
pub const FALLBACK_NOTES: &str = "Quality analysis failed";

/// The `{quality_score, notes}` object extracted from the analysis reply.
#[derive(Debug, Clone, Deserialize)]
pub struct QualityAnalysis {
    pub quality_score: f64,
    #[serde(default)]
    pub notes: String,
}

impl QualityAnalysis {
    /// Clamp the model's score into the valid [0.0, 1.0] range.
    pub fn clamped_score(&self) -> f64 {
        self.quality_score.clamp(0.0, 1.0)
    }

    /// The fallback result used when analysis cannot produce a score.
    pub fn fallback() -> Self {
        Self {
            quality_score: FALLBACK_SCORE,
            notes: FALLBACK_NOTES.to_string(),
        }
    }
}
