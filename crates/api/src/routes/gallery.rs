//! Route definitions for the `/gallery` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /                -> list_gallery
/// GET    /download/{id}   -> download_thumbnail
/// PATCH  /{id}/favorite   -> set_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery))
        .route("/download/{id}", get(gallery::download_thumbnail))
        .route("/{id}/favorite", patch(gallery::set_favorite))
}
