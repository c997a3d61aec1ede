//! Handler for concept generation.
//!
//! One call asks the text model for a batch of creative briefs, persists
//! them under a fresh session id, and returns the rows. The model reply is
//! free text that merely contains a JSON array, so extraction tolerates
//! prose and code fences around it.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use thumbsmith_core::concepts::{ConceptDraft, MAX_CONCEPTS_PER_BATCH};
use thumbsmith_core::extract::extract_json_array;
use thumbsmith_core::pricing::{CONCEPT_BATCH_COST, TEXT_MODEL};
use thumbsmith_core::prompts;
use thumbsmith_core::types::DbId;
use thumbsmith_db::models::concept::{Concept, CreateConcept};
use thumbsmith_db::models::usage_log::{CreateUsageLog, ACTION_CONCEPT_GENERATION};
use thumbsmith_db::repositories::{ConceptRepo, UsageLogRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConceptsRequest {
    pub video_title: String,
}

#[derive(Debug, Serialize)]
pub struct ConceptsResponse {
    pub success: bool,
    pub concepts: Vec<Concept>,
    pub session_id: DbId,
}

// ---------------------------------------------------------------------------
// POST /concepts/generate
// ---------------------------------------------------------------------------

/// Generates and persists a batch of thumbnail concepts for a video title.
pub async fn generate_concepts(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<GenerateConceptsRequest>,
) -> AppResult<impl IntoResponse> {
    let video_title = body.video_title.trim();
    if video_title.is_empty() {
        return Err(AppError::BadRequest("Video title is required".to_string()));
    }

    let prompt = prompts::concept_generation(video_title);
    let reply = state.gemini.generate_text(TEXT_MODEL, &prompt, &[]).await?;
    let drafts: Vec<ConceptDraft> = extract_json_array(&reply)?;

    let session_id = Uuid::new_v4();
    let inputs: Vec<CreateConcept> = drafts
        .into_iter()
        .take(MAX_CONCEPTS_PER_BATCH)
        .enumerate()
        .map(|(i, draft)| {
            CreateConcept::from_spec(
                user.user_id,
                video_title,
                (i + 1) as i32,
                session_id,
                draft.normalize(),
            )
        })
        .collect();

    let concepts = ConceptRepo::create_batch(&state.pool, &inputs).await?;

    UsageLogRepo::create(
        &state.pool,
        &CreateUsageLog {
            user_id: user.user_id,
            action_type: ACTION_CONCEPT_GENERATION.to_string(),
            api_cost: CONCEPT_BATCH_COST,
            metadata: serde_json::json!({
                "video_title": video_title,
                "concepts_generated": concepts.len(),
            }),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.user_id,
        session_id = %session_id,
        count = concepts.len(),
        "Concept batch generated"
    );

    Ok(Json(ConceptsResponse {
        success: true,
        concepts,
        session_id,
    }))
}
