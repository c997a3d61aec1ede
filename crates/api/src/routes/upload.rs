//! Route definitions for the `/upload` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST   /                -> upload_images (multipart or JSON)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_images))
}
