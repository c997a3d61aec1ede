//! Per-user quota and cumulative usage counters.

use serde::Serialize;
use sqlx::FromRow;
use thumbsmith_core::types::{DbId, Timestamp};

/// Credits granted to a profile on first touch.
pub const DEFAULT_QUOTA: i32 = 10;

/// A row from the `user_profiles` table.
///
/// `quota_remaining` gates paid thumbnail generation and never goes
/// negative (enforced by a CHECK constraint and the guarded decrement).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub user_id: DbId,
    pub quota_remaining: i32,
    pub thumbnails_generated: i32,
    pub api_cost_total: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
