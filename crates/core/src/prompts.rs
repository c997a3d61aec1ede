//! Prompt templates for the three model calls.

use crate::concepts::ConceptSpec;
use crate::pricing::QualityMode;

/// Prompt asking the text model for 10 emotion-based thumbnail concepts.
///
/// The embedded example object fixes the field names the parser expects;
/// the closing instruction names the required emotion spread.
pub fn concept_generation(video_title: &str) -> String {
    format!(
        r#"Generate 10 emotion-based YouTube thumbnail concepts for this video: "{video_title}"

Focus on pain points and emotions that make viewers click. For each concept, provide:
1. Arabic name (2-4 words, attention-grabbing)
2. English translation
3. Emotion to convey
4. Facial expression description
5. Why it works psychologically

Respond with ONLY a JSON array in this exact format:
[
  {{
    "name_ar": "الصدمة الكبرى",
    "name_en": "The Big Shock",
    "emotion": "shock",
    "expression": "wide eyes, open mouth, hand on cheek",
    "pose": "facing camera, slight head tilt",
    "scene": "close-up face shot",
    "background": "bright gradient blur",
    "arabic_text": "الصدمة",
    "text_position": "top-right",
    "text_style": "bold white with black outline",
    "why_it_works": "Shock triggers curiosity and fear of missing out"
  }}
]

Generate all 10 concepts with variety in emotions: shock, curiosity, frustration, excitement, confusion, anger, hope, fear, surprise, satisfaction."#
    )
}

/// Rubric prompt scoring one reference photo for thumbnail suitability.
///
/// Weights: lighting and face clarity 30%, expression visibility 30%,
/// sharpness 20%, framing 20%.
pub fn quality_analysis() -> String {
    r#"Rate this photo's suitability as a YouTube thumbnail reference on a 0.0-1.0 scale.

Score it against this rubric:
- Lighting and face clarity: 30%
- Expression visibility: 30%
- Sharpness: 20%
- Framing: 20%

Respond with ONLY a JSON object in this exact format:
{"quality_score": 0.85, "notes": "brief assessment"}"#
        .to_string()
}

/// Image-generation prompt rendering one concept against the reference
/// photos attached to the same request.
pub fn thumbnail_generation(concept: &ConceptSpec, mode: QualityMode) -> String {
    let size = mode.output_size();
    let detail = match mode {
        QualityMode::Fast => "clean draft quality",
        QualityMode::Hd => "highly detailed, production quality",
    };

    format!(
        "Create a YouTube thumbnail featuring the person from the attached reference photos.\n\
         Emotion: {emotion}. Facial expression: {expression}. Pose: {pose}.\n\
         Scene: {scene}. Background: {background}.\n\
         Overlay the Arabic text \"{arabic_text}\" at the {text_position} of the frame, {text_style}.\n\
         Render at {size}x{size}, {detail}, vibrant colors, high contrast, optimized for small preview sizes.",
        emotion = concept.emotion,
        expression = concept.expression,
        pose = concept.pose,
        scene = concept.scene,
        background = concept.background,
        arabic_text = concept.arabic_text,
        text_position = concept.text_position,
        text_style = concept.text_style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::ConceptDraft;

    fn spec() -> ConceptSpec {
        ConceptDraft {
            name_ar: "الأمل الأخير".to_string(),
            name_en: "The Last Hope".to_string(),
            emotion: "hope".to_string(),
            expression: "soft smile, raised eyebrows".to_string(),
            pose: None,
            scene: None,
            background: None,
            arabic_text: None,
            text_position: None,
            text_style: None,
            why_it_works: None,
        }
        .normalize()
    }

    #[test]
    fn concept_prompt_embeds_title_and_field_names() {
        let prompt = concept_generation("My Video");
        assert!(prompt.contains("\"My Video\""));
        assert!(prompt.contains("name_ar"));
        assert!(prompt.contains("why_it_works"));
        assert!(prompt.contains("satisfaction"));
    }

    #[test]
    fn quality_prompt_names_rubric_weights() {
        let prompt = quality_analysis();
        assert!(prompt.contains("30%"));
        assert!(prompt.contains("quality_score"));
    }

    #[test]
    fn thumbnail_prompt_uses_every_visual_field() {
        let prompt = thumbnail_generation(&spec(), QualityMode::Fast);
        assert!(prompt.contains("hope"));
        assert!(prompt.contains("soft smile"));
        assert!(prompt.contains("facing camera"));
        assert!(prompt.contains("الأمل الأخير"));
        assert!(prompt.contains("512x512"));
    }

    #[test]
    fn hd_prompt_renders_at_full_size() {
        let prompt = thumbnail_generation(&spec(), QualityMode::Hd);
        assert!(prompt.contains("1024x1024"));
        assert!(prompt.contains("production quality"));
    }
}
