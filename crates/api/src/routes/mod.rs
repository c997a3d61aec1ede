pub mod concepts;
pub mod gallery;
pub mod generate;
pub mod health;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /upload                        register a reference-photo batch (POST,
///                                multipart bytes or JSON references)
///
/// /concepts/generate             generate a concept batch (POST)
///
/// /generate                      render thumbnails (POST, quota-gated or
///                                by explicit concept ids)
///
/// /gallery                       list generated thumbnails (GET)
/// /gallery/download/{id}         download one thumbnail (GET)
/// /gallery/{id}/favorite         set the favorite flag (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Reference-photo intake.
        .nest("/upload", upload::router())
        // Concept authoring.
        .nest("/concepts", concepts::router())
        // Thumbnail rendering.
        .nest("/generate", generate::router())
        // Browsing and retrieval.
        .nest("/gallery", gallery::router())
}
