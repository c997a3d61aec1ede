//! Generated-thumbnail models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thumbsmith_core::types::{DbId, Timestamp};

/// A row from the `generated_thumbnails` table.
///
/// One row per successful image generation. `download_count` is the only
/// field mutated after insert (besides the favorite flag).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedThumbnail {
    pub id: DbId,
    pub user_id: DbId,
    pub concept_id: DbId,
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    /// Tier label: `"fast"` or `"hd"`.
    pub quality_mode: String,
    pub model_used: String,
    pub generation_time_ms: i64,
    pub api_cost: f64,
    pub download_count: i32,
    pub is_favorite: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a newly generated thumbnail.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGeneratedThumbnail {
    pub user_id: DbId,
    pub concept_id: DbId,
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    pub quality_mode: String,
    pub model_used: String,
    pub generation_time_ms: i64,
    pub api_cost: f64,
}

/// A gallery row: a thumbnail joined with its concept's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryThumbnail {
    pub id: DbId,
    pub concept_id: DbId,
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    pub quality_mode: String,
    pub model_used: String,
    pub generation_time_ms: i64,
    pub api_cost: f64,
    pub download_count: i32,
    pub is_favorite: bool,
    pub created_at: Timestamp,
    pub name_ar: String,
    pub name_en: String,
    pub emotion: String,
    pub expression: String,
}
