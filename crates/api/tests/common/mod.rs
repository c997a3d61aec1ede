use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::Engine;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use thumbsmith_api::auth::jwt::{generate_access_token, JwtConfig};
use thumbsmith_api::config::ServerConfig;
use thumbsmith_api::routes;
use thumbsmith_api::state::AppState;
use thumbsmith_core::concepts::{ConceptSpec, EMOTION_SPREAD};
use thumbsmith_core::validation::UploadLimits;
use thumbsmith_db::models::concept::{Concept, CreateConcept};
use thumbsmith_db::models::image::{CreateUploadedImage, UploadedImage};
use thumbsmith_db::repositories::{ConceptRepo, UploadedImageRepo};
use thumbsmith_gemini::GeminiClient;
use thumbsmith_storage::LocalStore;

/// Signing secret shared between token minting and the app under test.
pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Boundary used by the hand-built multipart bodies.
pub const MULTIPART_BOUNDARY: &str = "thumbsmith-test-boundary";

/// A minimal PNG header: enough for format sniffing, small enough to inline.
pub const SAMPLE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed JWT secret so tests can mint
/// their own tokens.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        limits: UploadLimits::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, a mock model endpoint, and a temp-dir object store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. Retry backoff is zeroed so
/// rate-limit tests do not sleep.
pub fn build_test_app(pool: PgPool, gemini_base_url: &str, storage_root: &Path) -> Router {
    let config = test_config();

    let gemini = GeminiClient::with_base_url("test-key", gemini_base_url)
        .expect("client construction should succeed")
        .with_retry_backoff(3, 0);
    let store = LocalStore::new(storage_root, "http://localhost:8080/files");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gemini: Arc::new(gemini),
        store: Arc::new(store),
        http: reqwest::Client::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(axum::extract::DefaultBodyLimit::max(config.max_body_bytes()))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint a `Bearer ...` header value for the given user.
pub fn bearer(user_id: Uuid) -> String {
    let token = generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, path: &str, auth: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(AUTHORIZATION, auth)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn patch_json_auth(
    app: Router,
    path: &str,
    auth: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(path)
        .header(AUTHORIZATION, auth)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a hand-built multipart body. Each part is
/// `(field_name, file_name, content_type, bytes)`.
pub async fn post_multipart_auth(
    app: Router,
    path: &str,
    auth: &str,
    parts: &[(&str, &str, &str, &[u8])],
) -> Response {
    let mut body = Vec::new();
    for (name, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(AUTHORIZATION, auth)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Model-reply builders (wiremock response bodies)
// ---------------------------------------------------------------------------

/// A generateContent reply whose first candidate carries one text part.
pub fn gemini_text_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}

/// A generateContent reply whose first candidate carries one inline image.
pub fn gemini_image_reply(mime_type: &str, bytes: &[u8]) -> serde_json::Value {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [
                {"inlineData": {"mimeType": mime_type, "data": data}}
            ]}}
        ]
    })
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a selected reference image row and place its bytes in the local
/// store so generation can read them back.
pub async fn seed_selected_image(
    pool: &PgPool,
    storage_root: &Path,
    user_id: Uuid,
    file_name: &str,
) -> UploadedImage {
    let storage_path = format!("{user_id}/{file_name}");
    let full_path = storage_root.join(&storage_path);
    tokio::fs::create_dir_all(full_path.parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(&full_path, SAMPLE_PNG).await.unwrap();

    let input = CreateUploadedImage {
        user_id,
        storage_path: storage_path.clone(),
        public_url: format!("http://localhost:8080/files/{storage_path}"),
        file_size: SAMPLE_PNG.len() as i64,
        mime_type: "image/png".to_string(),
        quality_score: 0.8,
        analysis_notes: None,
        is_selected: true,
    };
    UploadedImageRepo::create(pool, &input)
        .await
        .expect("seed image insert should succeed")
}

fn sample_spec(i: usize) -> ConceptSpec {
    // Distinct emotions let tests target one concept's prompt by substring.
    let emotion = EMOTION_SPREAD[(i - 1) % EMOTION_SPREAD.len()];
    ConceptSpec {
        name_ar: format!("مفهوم {i}"),
        name_en: format!("Concept {i}"),
        emotion: emotion.to_string(),
        expression: "raised eyebrow".to_string(),
        pose: "facing camera".to_string(),
        scene: "close-up".to_string(),
        background: "gradient blur".to_string(),
        arabic_text: format!("نص {i}"),
        text_position: "top".to_string(),
        text_style: "bold".to_string(),
        why_it_works: "Emotion-driven design".to_string(),
    }
}

/// Insert a concept batch for the user and return the created rows.
pub async fn seed_concepts(
    pool: &PgPool,
    user_id: Uuid,
    video_title: &str,
    count: usize,
) -> Vec<Concept> {
    let session_id = Uuid::new_v4();
    let inputs: Vec<CreateConcept> = (1..=count)
        .map(|i| {
            CreateConcept::from_spec(user_id, video_title, i as i32, session_id, sample_spec(i))
        })
        .collect();
    ConceptRepo::create_batch(pool, &inputs)
        .await
        .expect("seed concept insert should succeed")
}

/// Force the user's quota to an exact value, creating the profile if needed.
pub async fn set_quota(pool: &PgPool, user_id: Uuid, quota: i32) {
    sqlx::query(
        "INSERT INTO user_profiles (user_id, quota_remaining)
         VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET quota_remaining = $2",
    )
    .bind(user_id)
    .bind(quota)
    .execute(pool)
    .await
    .expect("quota seed should succeed");
}
