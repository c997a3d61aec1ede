//! Handlers for the thumbnail gallery.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use thumbsmith_core::error::CoreError;
use thumbsmith_core::types::DbId;
use thumbsmith_db::models::thumbnail::GalleryThumbnail;
use thumbsmith_db::repositories::ThumbnailRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub thumbnails: Vec<GalleryThumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct SetFavoriteRequest {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// GET /gallery
// ---------------------------------------------------------------------------

/// Lists the user's thumbnails newest first, joined with concept details.
pub async fn list_gallery(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let thumbnails = ThumbnailRepo::list_gallery(&state.pool, user.user_id).await?;
    Ok(Json(GalleryResponse {
        success: true,
        thumbnails,
    }))
}

// ---------------------------------------------------------------------------
// GET /gallery/download/{id}
// ---------------------------------------------------------------------------

/// Streams one thumbnail back as a file attachment and bumps its download
/// counter.
pub async fn download_thumbnail(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let thumbnail = ThumbnailRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Thumbnail",
            id,
        })?;

    // Counting is best effort; a failed bump must not block the download.
    if let Err(err) = ThumbnailRepo::increment_download_count(&state.pool, id).await {
        tracing::warn!(thumbnail_id = %id, error = %err, "Failed to bump download counter");
    }

    let response = state
        .http
        .get(&thumbnail.public_url)
        .send()
        .await
        .map_err(|err| {
            tracing::error!(thumbnail_id = %id, error = %err, "Thumbnail fetch failed");
            AppError::InternalError("Failed to fetch thumbnail from storage".to_string())
        })?;
    if !response.status().is_success() {
        tracing::error!(
            thumbnail_id = %id,
            status = %response.status(),
            "Thumbnail fetch returned an error status"
        );
        return Err(AppError::InternalError(
            "Failed to fetch thumbnail from storage".to_string(),
        ));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();
    let bytes = response.bytes().await.map_err(|err| {
        tracing::error!(thumbnail_id = %id, error = %err, "Thumbnail body read failed");
        AppError::InternalError("Failed to fetch thumbnail from storage".to_string())
    })?;

    Ok((
        StatusCode::OK,
        [
            (axum::http::header::CONTENT_TYPE, content_type),
            (
                axum::http::header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"thumbnail-{id}.jpg\""),
            ),
        ],
        bytes.to_vec(),
    ))
}

// ---------------------------------------------------------------------------
// PATCH /gallery/{id}/favorite
// ---------------------------------------------------------------------------

/// Flips the favorite flag on one of the user's thumbnails.
pub async fn set_favorite(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<SetFavoriteRequest>,
) -> AppResult<impl IntoResponse> {
    let updated =
        ThumbnailRepo::set_favorite(&state.pool, id, user.user_id, body.is_favorite).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "Thumbnail",
            id,
        }
        .into());
    }

    tracing::info!(
        user_id = %user.user_id,
        thumbnail_id = %id,
        is_favorite = body.is_favorite,
        "Favorite flag updated"
    );

    Ok(Json(FavoriteResponse {
        success: true,
        is_favorite: body.is_favorite,
    }))
}
