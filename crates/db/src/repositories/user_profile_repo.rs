//! Repository for the `user_profiles` table.

use sqlx::PgPool;
use thumbsmith_core::types::DbId;

use crate::models::user_profile::UserProfile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "user_id, quota_remaining, thumbnails_generated, api_cost_total, created_at, updated_at";

/// Provides quota and cumulative-usage accounting.
pub struct UserProfileRepo;

impl UserProfileRepo {
    /// Fetch the user's profile, creating it with the default quota on
    /// first touch.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserProfile, sqlx::Error> {
        let insert = format!(
            "INSERT INTO user_profiles (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        if let Some(profile) = sqlx::query_as::<_, UserProfile>(&insert)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
        {
            return Ok(profile);
        }

        let select = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&select)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Account for one successfully generated thumbnail: decrement quota,
    /// bump the cumulative counters, and return the updated row.
    ///
    /// The `quota_remaining > 0` guard means a concurrent spender cannot
    /// push the balance negative; `None` signals the credit was already
    /// gone and the caller must stop its loop.
    pub async fn record_generation(
        pool: &PgPool,
        user_id: DbId,
        cost: f64,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles
             SET quota_remaining = quota_remaining - 1,
                 thumbnails_generated = thumbnails_generated + 1,
                 api_cost_total = api_cost_total + $2,
                 updated_at = now()
             WHERE user_id = $1 AND quota_remaining > 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(cost)
            .fetch_optional(pool)
            .await
    }

    /// Accumulate cost and usage without touching quota (ungated
    /// generation paths).
    pub async fn record_ungated_generation(
        pool: &PgPool,
        user_id: DbId,
        cost: f64,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles
             SET thumbnails_generated = thumbnails_generated + 1,
                 api_cost_total = api_cost_total + $2,
                 updated_at = now()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(cost)
            .fetch_optional(pool)
            .await
    }
}
