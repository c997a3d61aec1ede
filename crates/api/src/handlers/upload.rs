//! Handlers for reference-photo uploads.
//!
//! One endpoint, two submission modes distinguished by content type:
//! raw file bytes as `multipart/form-data`, or JSON metadata for objects
//! the client already placed in storage. Both produce `uploaded_images`
//! rows marked as selected for generation.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use thumbsmith_core::analysis::QualityAnalysis;
use thumbsmith_core::batch::BatchOutcome;
use thumbsmith_core::extract::extract_json_object;
use thumbsmith_core::pricing::TEXT_MODEL;
use thumbsmith_core::prompts;
use thumbsmith_core::validation::{validate_image_batch, validate_upload_count};
use thumbsmith_db::models::image::{CreateUploadedImage, UploadedImage};
use thumbsmith_db::models::usage_log::{CreateUsageLog, ACTION_IMAGE_UPLOAD};
use thumbsmith_db::repositories::{UploadedImageRepo, UsageLogRepo};
use thumbsmith_gemini::ImagePayload;
use thumbsmith_storage::keys::upload_key;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// JSON-mode body: metadata for objects already placed in storage.
#[derive(Debug, Deserialize)]
pub struct RegisterUploadsRequest {
    pub uploads: Vec<PreUploadedImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreUploadedImage {
    pub storage_path: String,
    pub public_url: String,
    pub file_size: i64,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Files that made it into storage and the database.
    pub uploaded: usize,
    /// Of those, how many are in the generation reference set (all of them;
    /// batches are small enough that every member qualifies).
    pub selected: usize,
    pub images: Vec<UploadedImage>,
}

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

/// Accepts a reference-photo batch in either submission mode.
///
/// Multipart bodies carry the bytes themselves; anything else is parsed
/// as the JSON metadata form.
pub async fn upload_images(
    user: AuthUser,
    State(state): State<AppState>,
    request: Request,
) -> AppResult<impl IntoResponse> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload_from_files(user, state, multipart).await
    } else {
        let Json(body) = Json::<RegisterUploadsRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        register_references(user, state, body).await
    }
}

// ---------------------------------------------------------------------------
// Multipart mode: store bytes, score each image
// ---------------------------------------------------------------------------

async fn upload_from_files(
    user: AuthUser,
    state: AppState,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut files: Vec<(String, String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("images") {
            continue; // ignore unknown fields
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        files.push((file_name, mime_type, bytes.to_vec()));
    }

    validate_upload_count(files.len())?;
    let candidates: Vec<(&str, u64)> = files
        .iter()
        .map(|(_, mime, bytes)| (mime.as_str(), bytes.len() as u64))
        .collect();
    validate_image_batch(&candidates, &state.config.limits)?;

    let mut outcome = BatchOutcome::new();
    let mut images = Vec::with_capacity(files.len());

    for (file_name, mime_type, bytes) in &files {
        let key = upload_key(user.user_id, file_name);
        let stored = match state.store.put(&key, bytes, mime_type).await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(file_name, error = %err, "Skipping file that failed to store");
                outcome.record_failure(format!("{file_name}: {err}"));
                continue;
            }
        };

        let analysis = analyze_quality(&state, mime_type, bytes).await;

        let input = CreateUploadedImage {
            user_id: user.user_id,
            storage_path: stored.storage_path,
            public_url: stored.public_url,
            file_size: bytes.len() as i64,
            mime_type: mime_type.clone(),
            quality_score: analysis.clamped_score(),
            analysis_notes: (!analysis.notes.is_empty()).then_some(analysis.notes),
            is_selected: true,
        };
        match UploadedImageRepo::create(&state.pool, &input).await {
            Ok(row) => {
                outcome.record_success();
                images.push(row);
            }
            Err(err) => {
                tracing::warn!(file_name, error = %err, "Skipping file that failed to persist");
                outcome.record_failure(format!("{file_name}: {err}"));
            }
        }
    }

    finish_upload(user, &state, outcome, images, "files").await
}

/// Scores one image via the quality-analysis model.
///
/// Any failure, from the call itself to an unparseable reply, degrades to
/// the fixed fallback score instead of rejecting the upload.
async fn analyze_quality(state: &AppState, mime_type: &str, bytes: &[u8]) -> QualityAnalysis {
    let image = ImagePayload::new(mime_type, bytes.to_vec());
    let prompt = prompts::quality_analysis();
    match state
        .gemini
        .generate_text(TEXT_MODEL, &prompt, std::slice::from_ref(&image))
        .await
    {
        Ok(text) => match extract_json_object::<QualityAnalysis>(&text) {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(error = %err, "Quality analysis reply unparseable, using fallback");
                QualityAnalysis::fallback()
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "Quality analysis call failed, using fallback");
            QualityAnalysis::fallback()
        }
    }
}

// ---------------------------------------------------------------------------
// JSON mode: register pre-uploaded storage references
// ---------------------------------------------------------------------------

async fn register_references(
    user: AuthUser,
    state: AppState,
    body: RegisterUploadsRequest,
) -> AppResult<Json<UploadResponse>> {
    validate_upload_count(body.uploads.len())?;
    let candidates: Vec<(&str, u64)> = body
        .uploads
        .iter()
        .map(|upload| (upload.mime_type.as_str(), upload.file_size.max(0) as u64))
        .collect();
    validate_image_batch(&candidates, &state.config.limits)?;

    let mut outcome = BatchOutcome::new();
    let mut images = Vec::with_capacity(body.uploads.len());

    // The bytes never pass through this server, so there is nothing to
    // send to the scoring model; direct uploads get a fixed good score.
    for upload in &body.uploads {
        let input = CreateUploadedImage {
            user_id: user.user_id,
            storage_path: upload.storage_path.clone(),
            public_url: upload.public_url.clone(),
            file_size: upload.file_size,
            mime_type: upload.mime_type.clone(),
            quality_score: thumbsmith_core::analysis::DIRECT_UPLOAD_SCORE,
            analysis_notes: Some(thumbsmith_core::analysis::DIRECT_UPLOAD_NOTES.to_string()),
            is_selected: true,
        };
        match UploadedImageRepo::create(&state.pool, &input).await {
            Ok(row) => {
                outcome.record_success();
                images.push(row);
            }
            Err(err) => {
                tracing::warn!(
                    storage_path = %upload.storage_path,
                    error = %err,
                    "Skipping reference that failed to persist"
                );
                outcome.record_failure(format!("{}: {err}", upload.storage_path));
            }
        }
    }

    finish_upload(user, &state, outcome, images, "references").await
}

// ---------------------------------------------------------------------------
// Shared tail: total-failure check, usage log, response
// ---------------------------------------------------------------------------

async fn finish_upload(
    user: AuthUser,
    state: &AppState,
    outcome: BatchOutcome,
    images: Vec<UploadedImage>,
    mode: &str,
) -> AppResult<Json<UploadResponse>> {
    if outcome.is_total_failure() {
        tracing::error!(reasons = ?outcome.failures(), "Every image in the batch failed");
        return Err(AppError::InternalError(
            "Failed to upload any images".to_string(),
        ));
    }

    UsageLogRepo::create(
        &state.pool,
        &CreateUsageLog {
            user_id: user.user_id,
            action_type: ACTION_IMAGE_UPLOAD.to_string(),
            api_cost: 0.0,
            metadata: serde_json::json!({
                "attempted": outcome.attempted(),
                "succeeded": outcome.succeeded(),
                "mode": mode,
            }),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.user_id,
        uploaded = outcome.succeeded(),
        failed = outcome.failed(),
        mode,
        "Reference photo batch processed"
    );

    Ok(Json(UploadResponse {
        success: true,
        uploaded: outcome.succeeded(),
        selected: images.len(),
        images,
    }))
}
