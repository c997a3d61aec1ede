//! Repository for the `thumbnail_concepts` table.

use sqlx::PgPool;
use thumbsmith_core::types::DbId;

use crate::models::concept::{Concept, CreateConcept};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, video_title, concept_number, name_ar, name_en, emotion, \
                       expression, pose, scene, background, arabic_text, text_position, \
                       text_style, why_it_works, session_id, created_at";

/// Provides persistence for AI-authored thumbnail concepts.
pub struct ConceptRepo;

impl ConceptRepo {
    /// Insert a whole generation batch in one transaction, returning the
    /// created rows in batch order.
    ///
    /// All-or-nothing: a failed insert rolls back the batch, so a session
    /// id never refers to a partial set of concepts.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[CreateConcept],
    ) -> Result<Vec<Concept>, sqlx::Error> {
        let query = format!(
            "INSERT INTO thumbnail_concepts
                (user_id, video_title, concept_number, name_ar, name_en, emotion,
                 expression, pose, scene, background, arabic_text, text_position,
                 text_style, why_it_works, session_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let concept = sqlx::query_as::<_, Concept>(&query)
                .bind(input.user_id)
                .bind(&input.video_title)
                .bind(input.concept_number)
                .bind(&input.name_ar)
                .bind(&input.name_en)
                .bind(&input.emotion)
                .bind(&input.expression)
                .bind(&input.pose)
                .bind(&input.scene)
                .bind(&input.background)
                .bind(&input.arabic_text)
                .bind(&input.text_position)
                .bind(&input.text_style)
                .bind(&input.why_it_works)
                .bind(input.session_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(concept);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Load the user's most recent concepts, in batch order.
    ///
    /// Rows inside one batch share a transaction timestamp, so the ordinal
    /// is the tiebreaker that keeps the latest batch in concept order.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Concept>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM thumbnail_concepts
             WHERE user_id = $1
             ORDER BY created_at DESC, concept_number ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, Concept>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Load exactly the named concepts owned by the user, in ordinal order.
    ///
    /// Ids that do not exist or belong to someone else are silently absent
    /// from the result.
    pub async fn find_by_ids(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Concept>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM thumbnail_concepts
             WHERE user_id = $1 AND id = ANY($2)
             ORDER BY concept_number ASC"
        );
        sqlx::query_as::<_, Concept>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
