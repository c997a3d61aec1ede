use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Upstream response parse failed: {0}")]
    UpstreamParse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
