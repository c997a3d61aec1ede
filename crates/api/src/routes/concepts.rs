//! Route definitions for the `/concepts` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::concepts;
use crate::state::AppState;

/// Routes mounted at `/concepts`.
///
/// ```text
/// POST   /generate        -> generate_concepts
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(concepts::generate_concepts))
}
