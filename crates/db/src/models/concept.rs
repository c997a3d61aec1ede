//! Thumbnail-concept models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thumbsmith_core::concepts::ConceptSpec;
use thumbsmith_core::types::{DbId, Timestamp};

/// A row from the `thumbnail_concepts` table.
///
/// Concepts are batch-inserted once per generation call and immutable
/// thereafter. All members of a batch share one `session_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Concept {
    pub id: DbId,
    pub user_id: DbId,
    pub video_title: String,
    /// 1-based ordinal within the generation batch.
    pub concept_number: i32,
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
    pub session_id: DbId,
    pub created_at: Timestamp,
}

impl Concept {
    /// Rebuild the creative brief for prompt construction.
    pub fn to_spec(&self) -> ConceptSpec {
        ConceptSpec {
            name_ar: self.name_ar.clone(),
            name_en: self.name_en.clone(),
            emotion: self.emotion.clone(),
            expression: self.expression.clone(),
            pose: self.pose.clone(),
            scene: self.scene.clone(),
            background: self.background.clone(),
            arabic_text: self.arabic_text.clone(),
            text_position: self.text_position.clone(),
            text_style: self.text_style.clone(),
            why_it_works: self.why_it_works.clone(),
        }
    }
}

/// DTO for inserting one concept of a generation batch.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConcept {
    pub user_id: DbId,
    pub video_title: String,
    pub concept_number: i32,
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
    pub session_id: DbId,
}

impl CreateConcept {
    /// Build the insert DTO from a normalized brief.
    pub fn from_spec(
        user_id: DbId,
        video_title: &str,
        concept_number: i32,
        session_id: DbId,
        spec: ConceptSpec,
    ) -> Self {
        Self {
            user_id,
            video_title: video_title.to_string(),
            concept_number,
            name_ar: spec.name_ar,
            name_en: spec.name_en,
            emotion: spec.emotion,
            expression: spec.expression,
            pose: spec.pose,
            scene: spec.scene,
            background: spec.background,
            arabic_text: spec.arabic_text,
            text_position: spec.text_position,
            text_style: spec.text_style,
            why_it_works: spec.why_it_works,
            session_id,
        }
    }
}
