//! Handler for thumbnail generation.
//!
//! The batch endpoint renders one image per concept, tolerating per-concept
//! failures: a concept whose render, storage write, or insert fails is
//! skipped and the batch carries on. Quota gates the default path and is
//! re-checked per success, so concurrent batches cannot overspend.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use thumbsmith_core::batch::BatchOutcome;
use thumbsmith_core::error::CoreError;
use thumbsmith_core::pricing::QualityMode;
use thumbsmith_core::prompts;
use thumbsmith_core::types::DbId;
use thumbsmith_db::models::concept::Concept;
use thumbsmith_db::models::thumbnail::{CreateGeneratedThumbnail, GeneratedThumbnail};
use thumbsmith_db::models::usage_log::{CreateUsageLog, ACTION_THUMBNAIL_GENERATION};
use thumbsmith_db::repositories::{
    ConceptRepo, ThumbnailRepo, UploadedImageRepo, UsageLogRepo, UserProfileRepo,
};
use thumbsmith_gemini::ImagePayload;
use thumbsmith_storage::keys::thumbnail_key;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Body of a generation call, in one of two forms.
///
/// `conceptIds` selects specific concepts and bypasses the quota gate
/// (re-renders of briefs the user already owns); a bare `qualityMode`
/// renders the latest batch under quota. Untagged, so the id form must be
/// listed first to win when both keys are present.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    BySelection {
        #[serde(rename = "conceptIds")]
        concept_ids: Vec<DbId>,
        #[serde(rename = "qualityMode")]
        quality_mode: Option<String>,
    },
    ByQuality {
        #[serde(rename = "qualityMode")]
        quality_mode: String,
    },
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub generated: usize,
    pub thumbnails: Vec<GeneratedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_remaining: Option<i32>,
}

/// Whether the render loop spends quota credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuotaGate {
    Enforced,
    Bypassed,
}

// ---------------------------------------------------------------------------
// POST /generate
// ---------------------------------------------------------------------------

/// Renders thumbnails for the latest concepts (quota-gated) or for an
/// explicit concept selection (ungated).
pub async fn generate_thumbnails(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match request {
        GenerateRequest::ByQuality { quality_mode } => {
            let mode = QualityMode::from_name(&quality_mode)?;
            generate_latest_batch(user, state, mode).await
        }
        GenerateRequest::BySelection {
            concept_ids,
            quality_mode,
        } => {
            let mode = match quality_mode {
                Some(name) => QualityMode::from_name(&name)?,
                None => QualityMode::Fast,
            };
            generate_selection(user, state, concept_ids, mode).await
        }
    }
}

/// Default path: render the user's most recent concept batch, spending one
/// quota credit per successful render.
async fn generate_latest_batch(
    user: AuthUser,
    state: AppState,
    mode: QualityMode,
) -> AppResult<Json<GenerateResponse>> {
    let references = load_reference_images(&state, user.user_id).await?;

    let concepts = ConceptRepo::list_recent(
        &state.pool,
        user.user_id,
        thumbsmith_core::concepts::MAX_CONCEPTS_PER_BATCH as i64,
    )
    .await?;
    if concepts.is_empty() {
        return Err(AppError::BadRequest(
            "No concepts found. Generate concepts first.".to_string(),
        ));
    }

    let profile = UserProfileRepo::get_or_create(&state.pool, user.user_id).await?;
    if profile.quota_remaining <= 0 {
        return Err(CoreError::QuotaExhausted(
            "Quota exhausted. No generation credits remaining.".to_string(),
        )
        .into());
    }

    // Never start more renders than the user can pay for.
    let budget = (profile.quota_remaining as usize).min(concepts.len());
    let batch = &concepts[..budget];

    run_generation(user, state, batch, &references, mode, QuotaGate::Enforced).await
}

/// Explicit-selection path: render exactly the named concepts without
/// touching quota.
async fn generate_selection(
    user: AuthUser,
    state: AppState,
    concept_ids: Vec<DbId>,
    mode: QualityMode,
) -> AppResult<Json<GenerateResponse>> {
    if concept_ids.is_empty() {
        return Err(AppError::BadRequest(
            "conceptIds must not be empty".to_string(),
        ));
    }

    let references = load_reference_images(&state, user.user_id).await?;

    let concepts = ConceptRepo::find_by_ids(&state.pool, user.user_id, &concept_ids).await?;
    if concepts.is_empty() {
        return Err(AppError::BadRequest(
            "No concepts found for the given ids".to_string(),
        ));
    }

    run_generation(
        user,
        state,
        &concepts,
        &references,
        mode,
        QuotaGate::Bypassed,
    )
    .await
}

// ---------------------------------------------------------------------------
// Shared machinery
// ---------------------------------------------------------------------------

/// Load the selected reference photos and fetch their bytes from storage.
///
/// References whose object has gone missing are skipped with a warning;
/// only a fully unreadable set aborts the request.
async fn load_reference_images(
    state: &AppState,
    user_id: DbId,
) -> AppResult<Vec<ImagePayload>> {
    let rows = UploadedImageRepo::list_selected(&state.pool, user_id).await?;
    if rows.is_empty() {
        return Err(AppError::BadRequest(
            "No selected reference images found. Upload reference photos first.".to_string(),
        ));
    }

    let mut references = Vec::with_capacity(rows.len());
    for row in &rows {
        match state.store.get(&row.storage_path).await {
            Ok(bytes) => references.push(ImagePayload::new(row.mime_type.clone(), bytes)),
            Err(err) => {
                tracing::warn!(
                    storage_path = %row.storage_path,
                    error = %err,
                    "Skipping unreadable reference image"
                );
            }
        }
    }

    if references.is_empty() {
        return Err(AppError::InternalError(
            "Could not read any reference image from storage".to_string(),
        ));
    }
    Ok(references)
}

/// Render one thumbnail per concept, persisting successes and accounting
/// per success so a failed render never costs a credit.
async fn run_generation(
    user: AuthUser,
    state: AppState,
    concepts: &[Concept],
    references: &[ImagePayload],
    mode: QualityMode,
    gate: QuotaGate,
) -> AppResult<Json<GenerateResponse>> {
    let requested = concepts.len();
    let mut outcome = BatchOutcome::new();
    let mut thumbnails = Vec::with_capacity(requested);
    let mut quota_remaining = None;

    for concept in concepts {
        let prompt = prompts::thumbnail_generation(&concept.to_spec(), mode);
        let started = Instant::now();

        let payload = match state
            .gemini
            .generate_image(mode.model_id(), &prompt, references)
            .await
        {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(
                    concept_number = concept.concept_number,
                    error = %err,
                    "Skipping concept whose render failed"
                );
                outcome.record_failure(format!("concept {}: {err}", concept.concept_number));
                continue;
            }
        };
        let generation_time_ms = started.elapsed().as_millis() as i64;

        let extension = image_extension(&payload);
        let key = thumbnail_key(user.user_id, concept.concept_number, extension);
        let stored = match state.store.put(&key, &payload.bytes, &payload.mime_type).await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(
                    concept_number = concept.concept_number,
                    error = %err,
                    "Skipping concept whose render failed to store"
                );
                outcome.record_failure(format!("concept {}: {err}", concept.concept_number));
                continue;
            }
        };

        let input = CreateGeneratedThumbnail {
            user_id: user.user_id,
            concept_id: concept.id,
            storage_path: stored.storage_path,
            public_url: stored.public_url,
            file_size: payload.bytes.len() as i64,
            quality_mode: mode.label().to_string(),
            model_used: mode.model_id().to_string(),
            generation_time_ms,
            api_cost: mode.cost_per_image(),
        };
        let row = match ThumbnailRepo::create(&state.pool, &input).await {
            Ok(row) => row,
            Err(err) => {
                tracing::error!(
                    concept_number = concept.concept_number,
                    error = %err,
                    "Skipping concept whose render failed to persist"
                );
                outcome.record_failure(format!("concept {}: {err}", concept.concept_number));
                continue;
            }
        };

        outcome.record_success();
        match gate {
            QuotaGate::Enforced => {
                match UserProfileRepo::record_generation(
                    &state.pool,
                    user.user_id,
                    mode.cost_per_image(),
                )
                .await?
                {
                    Some(profile) => {
                        quota_remaining = Some(profile.quota_remaining);
                        thumbnails.push(row);
                        if profile.quota_remaining <= 0 {
                            break;
                        }
                    }
                    None => {
                        // A concurrent batch took the last credit between our
                        // pre-check and this decrement. The render already
                        // happened, so keep the row and stop spending.
                        tracing::warn!(
                            user_id = %user.user_id,
                            "Quota exhausted mid-batch, stopping"
                        );
                        quota_remaining = Some(0);
                        thumbnails.push(row);
                        break;
                    }
                }
            }
            QuotaGate::Bypassed => {
                UserProfileRepo::record_ungated_generation(
                    &state.pool,
                    user.user_id,
                    mode.cost_per_image(),
                )
                .await?;
                thumbnails.push(row);
            }
        }
    }

    if outcome.is_total_failure() {
        tracing::error!(reasons = ?outcome.failures(), "Every render in the batch failed");
        return Err(AppError::InternalError(
            "Failed to generate any thumbnails".to_string(),
        ));
    }

    UsageLogRepo::create(
        &state.pool,
        &CreateUsageLog {
            user_id: user.user_id,
            action_type: ACTION_THUMBNAIL_GENERATION.to_string(),
            api_cost: mode.cost_per_image() * outcome.succeeded() as f64,
            metadata: serde_json::json!({
                "requested": requested,
                "generated": outcome.succeeded(),
                "quality_mode": mode.label(),
            }),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.user_id,
        requested,
        generated = outcome.succeeded(),
        failed = outcome.failed(),
        quality_mode = mode.label(),
        "Thumbnail batch finished"
    );

    Ok(Json(GenerateResponse {
        success: true,
        generated: outcome.succeeded(),
        thumbnails,
        quota_remaining,
    }))
}

/// Pick a file extension from the rendered bytes, falling back to the
/// declared MIME type when the magic bytes are unrecognized.
fn image_extension(payload: &ImagePayload) -> &'static str {
    match image::guess_format(&payload.bytes) {
        Ok(image::ImageFormat::Png) => "png",
        Ok(image::ImageFormat::Jpeg) => "jpg",
        Ok(image::ImageFormat::WebP) => "webp",
        _ => match payload.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        },
    }
}
