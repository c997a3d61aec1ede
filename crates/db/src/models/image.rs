//! Uploaded reference-image models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thumbsmith_core::types::{DbId, Timestamp};

/// A row from the `uploaded_images` table.
///
/// Created on upload and never deleted by this system; only the
/// `is_selected` flag is mutated afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadedImage {
    pub id: DbId,
    pub user_id: DbId,
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    pub mime_type: String,
    /// Thumbnail-suitability score in [0.0, 1.0].
    pub quality_score: f64,
    pub analysis_notes: Option<String>,
    /// Whether this image is part of the generation reference set.
    pub is_selected: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a new uploaded image.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUploadedImage {
    pub user_id: DbId,
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    pub mime_type: String,
    pub quality_score: f64,
    pub analysis_notes: Option<String>,
    pub is_selected: bool,
}
