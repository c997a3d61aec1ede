//! Usage-log models: the append-only billing audit trail.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thumbsmith_core::types::{DbId, Timestamp};

/// Action recorded for one reference-photo upload batch.
pub const ACTION_IMAGE_UPLOAD: &str = "image_upload";

/// Action recorded for one concept-generation batch.
pub const ACTION_CONCEPT_GENERATION: &str = "concept_generation";

/// Action recorded for one thumbnail-generation batch.
pub const ACTION_THUMBNAIL_GENERATION: &str = "thumbnail_generation";

/// A row from the `usage_logs` table. One row per billable batch, never
/// updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action_type: String,
    pub api_cost: f64,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a usage-log row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUsageLog {
    pub user_id: DbId,
    pub action_type: String,
    pub api_cost: f64,
    pub metadata: serde_json::Value,
}
