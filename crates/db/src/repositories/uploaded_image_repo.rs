//! Repository for the `uploaded_images` table.

use sqlx::PgPool;
use thumbsmith_core::types::DbId;
use thumbsmith_core::validation::MAX_UPLOAD_IMAGES;

use crate::models::image::{CreateUploadedImage, UploadedImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, storage_path, public_url, file_size, mime_type, \
                       quality_score, analysis_notes, is_selected, created_at";

/// Provides persistence for uploaded reference images.
pub struct UploadedImageRepo;

impl UploadedImageRepo {
    /// Insert a new uploaded image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUploadedImage,
    ) -> Result<UploadedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploaded_images
                (user_id, storage_path, public_url, file_size, mime_type,
                 quality_score, analysis_notes, is_selected)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UploadedImage>(&query)
            .bind(input.user_id)
            .bind(&input.storage_path)
            .bind(&input.public_url)
            .bind(input.file_size)
            .bind(&input.mime_type)
            .bind(input.quality_score)
            .bind(&input.analysis_notes)
            .bind(input.is_selected)
            .fetch_one(pool)
            .await
    }

    /// Load the user's generation reference set: selected images, best
    /// quality first, capped at the reference-set maximum.
    pub async fn list_selected(pool: &PgPool, user_id: DbId) -> Result<Vec<UploadedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM uploaded_images
             WHERE user_id = $1 AND is_selected = true
             ORDER BY quality_score DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, UploadedImage>(&query)
            .bind(user_id)
            .bind(MAX_UPLOAD_IMAGES as i64)
            .fetch_all(pool)
            .await
    }

}
