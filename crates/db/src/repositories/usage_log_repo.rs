//! Repository for the `usage_logs` table (append-only).

use sqlx::PgPool;

use crate::models::usage_log::{CreateUsageLog, UsageLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action_type, api_cost, metadata, created_at";

/// Provides the billing audit trail. Rows are only ever appended.
pub struct UsageLogRepo;

impl UsageLogRepo {
    /// Append one billable-action row.
    pub async fn create(pool: &PgPool, input: &CreateUsageLog) -> Result<UsageLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO usage_logs (user_id, action_type, api_cost, metadata)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UsageLog>(&query)
            .bind(input.user_id)
            .bind(&input.action_type)
            .bind(input.api_cost)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }
}
