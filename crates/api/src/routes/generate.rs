//! Route definitions for the `/generate` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::thumbnails;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST   /                -> generate_thumbnails
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(thumbnails::generate_thumbnails))
}
