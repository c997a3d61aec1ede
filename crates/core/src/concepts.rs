//! Concept briefs: the model-output shape, normalization, and field defaults.
//!
//! A concept is an AI-authored creative brief for one thumbnail. The model
//! returns up to [`MAX_CONCEPTS_PER_BATCH`] of them per request; optional
//! fields it leaves out are filled from the documented defaults before
//! anything is persisted.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Concepts persisted per generation batch (model output is truncated here).
pub const MAX_CONCEPTS_PER_BATCH: usize = 10;

/// Emotion spread the prompt instructs the model to cover.
pub const EMOTION_SPREAD: &[&str] = &[
    "shock",
    "curiosity",
    "frustration",
    "excitement",
    "confusion",
    "anger",
    "hope",
    "fear",
    "surprise",
    "satisfaction",
];

/// Default pose when the model omits one.
pub const DEFAULT_POSE: &str = "facing camera";
/// Default scene framing.
pub const DEFAULT_SCENE: &str = "close-up";
/// Default background treatment.
pub const DEFAULT_BACKGROUND: &str = "gradient blur";
/// Default overlay-text position.
pub const DEFAULT_TEXT_POSITION: &str = "top";
/// Default overlay-text style.
pub const DEFAULT_TEXT_STYLE: &str = "bold";
/// Default rationale.
pub const DEFAULT_WHY_IT_WORKS: &str = "Emotion-driven design";

// ---------------------------------------------------------------------------
// Model-output shape
// ---------------------------------------------------------------------------

/// One concept entry as emitted by the text model.
///
/// The four identity fields are required; a response missing any of them is
/// treated as malformed. Everything else defaults via [`ConceptDraft::normalize`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptDraft {
    pub name_ar: String,
    pub name_en: String,
    pub emotion: String,
    pub expression: String,
    #[serde(default)]
    pub pose: Option<String>,
    #[serde(default)]
    pub scene: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub arabic_text: Option<String>,
    #[serde(default)]
    pub text_position: Option<String>,
    #[serde(default)]
    pub text_style: Option<String>,
    #[serde(default)]
    pub why_it_works: Option<String>,
}

/// A fully populated concept brief, every field present.
#[derive(Debug, Clone)]
pub struct ConceptSpec {
    pub name_ar: String,
    pub name_en: String,
    pub emotion: String,
    pub expression: String,
    pub pose: String,
    pub scene: String,
    pub background: String,
    pub arabic_text: String,
    pub text_position: String,
    pub text_style: String,
    pub why_it_works: String,
}

impl ConceptDraft {
    /// Fill every omitted optional field with its documented default.
    ///
    /// Missing overlay text falls back to the Arabic name, matching how the
    /// briefs are displayed.
    pub fn normalize(self) -> ConceptSpec {
        let arabic_text = self
            .arabic_text
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.name_ar.clone());

        ConceptSpec {
            name_ar: self.name_ar,
            name_en: self.name_en,
            emotion: self.emotion,
            expression: self.expression,
            pose: non_empty_or(self.pose, DEFAULT_POSE),
            scene: non_empty_or(self.scene, DEFAULT_SCENE),
            background: non_empty_or(self.background, DEFAULT_BACKGROUND),
            arabic_text,
            text_position: non_empty_or(self.text_position, DEFAULT_TEXT_POSITION),
            text_style: non_empty_or(self.text_style, DEFAULT_TEXT_STYLE),
            why_it_works: non_empty_or(self.why_it_works, DEFAULT_WHY_IT_WORKS),
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_draft() -> ConceptDraft {
        ConceptDraft {
            name_ar: "الصدمة الكبرى".to_string(),
            name_en: "The Big Shock".to_string(),
            emotion: "shock".to_string(),
            expression: "wide eyes, open mouth".to_string(),
            pose: None,
            scene: None,
            background: None,
            arabic_text: None,
            text_position: None,
            text_style: None,
            why_it_works: None,
        }
    }

    #[test]
    fn normalize_fills_every_default() {
        let spec = minimal_draft().normalize();
        assert_eq!(spec.pose, DEFAULT_POSE);
        assert_eq!(spec.scene, DEFAULT_SCENE);
        assert_eq!(spec.background, DEFAULT_BACKGROUND);
        assert_eq!(spec.text_position, DEFAULT_TEXT_POSITION);
        assert_eq!(spec.text_style, DEFAULT_TEXT_STYLE);
        assert_eq!(spec.why_it_works, DEFAULT_WHY_IT_WORKS);
    }

    #[test]
    fn missing_overlay_text_falls_back_to_arabic_name() {
        let spec = minimal_draft().normalize();
        assert_eq!(spec.arabic_text, "الصدمة الكبرى");
    }

    #[test]
    fn empty_strings_are_treated_as_missing() {
        let mut draft = minimal_draft();
        draft.pose = Some("  ".to_string());
        draft.arabic_text = Some(String::new());
        let spec = draft.normalize();
        assert_eq!(spec.pose, DEFAULT_POSE);
        assert_eq!(spec.arabic_text, "الصدمة الكبرى");
    }

    #[test]
    fn provided_fields_survive_normalization() {
        let mut draft = minimal_draft();
        draft.pose = Some("side profile".to_string());
        draft.text_style = Some("bold white with black outline".to_string());
        let spec = draft.normalize();
        assert_eq!(spec.pose, "side profile");
        assert_eq!(spec.text_style, "bold white with black outline");
    }

    #[test]
    fn draft_requires_identity_fields() {
        let err = serde_json::from_str::<ConceptDraft>(r#"{"name_ar": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn emotion_spread_covers_ten_emotions() {
        assert_eq!(EMOTION_SPREAD.len(), MAX_CONCEPTS_PER_BATCH);
    }
}
