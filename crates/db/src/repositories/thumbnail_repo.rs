//! Repository for the `generated_thumbnails` table.

use sqlx::PgPool;
use thumbsmith_core::types::DbId;

use crate::models::thumbnail::{CreateGeneratedThumbnail, GalleryThumbnail, GeneratedThumbnail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, concept_id, storage_path, public_url, file_size, \
                       quality_mode, model_used, generation_time_ms, api_cost, \
                       download_count, is_favorite, created_at";

/// Provides persistence for generated thumbnails.
pub struct ThumbnailRepo;

impl ThumbnailRepo {
    /// Insert a newly generated thumbnail, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedThumbnail,
    ) -> Result<GeneratedThumbnail, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_thumbnails
                (user_id, concept_id, storage_path, public_url, file_size,
                 quality_mode, model_used, generation_time_ms, api_cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedThumbnail>(&query)
            .bind(input.user_id)
            .bind(input.concept_id)
            .bind(&input.storage_path)
            .bind(&input.public_url)
            .bind(input.file_size)
            .bind(&input.quality_mode)
            .bind(&input.model_used)
            .bind(input.generation_time_ms)
            .bind(input.api_cost)
            .fetch_one(pool)
            .await
    }

    /// Find one thumbnail owned by the given user.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<GeneratedThumbnail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_thumbnails WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, GeneratedThumbnail>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user's gallery: thumbnails newest first, joined with their
    /// concept's display fields.
    pub async fn list_gallery(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GalleryThumbnail>, sqlx::Error> {
        sqlx::query_as::<_, GalleryThumbnail>(
            "SELECT t.id, t.concept_id, t.storage_path, t.public_url, t.file_size,
                    t.quality_mode, t.model_used, t.generation_time_ms, t.api_cost,
                    t.download_count, t.is_favorite, t.created_at,
                    c.name_ar, c.name_en, c.emotion, c.expression
             FROM generated_thumbnails t
             JOIN thumbnail_concepts c ON c.id = t.concept_id
             WHERE t.user_id = $1
             ORDER BY t.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Bump the download counter. Returns `true` if a row was updated.
    pub async fn increment_download_count(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generated_thumbnails
             SET download_count = download_count + 1
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the favorite flag on one of the user's thumbnails.
    pub async fn set_favorite(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        favorite: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE generated_thumbnails
             SET is_favorite = $3
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(favorite)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
