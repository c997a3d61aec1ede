use std::sync::Arc;

use thumbsmith_gemini::GeminiClient;
use thumbsmith_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: thumbsmith_db::DbPool,
    /// Server configuration (limits, JWT secret, timeouts).
    pub config: Arc<ServerConfig>,
    /// Generative model client, constructed once at startup and injected
    /// so tests can point it at a mock server.
    pub gemini: Arc<GeminiClient>,
    /// Object storage backend for reference photos and thumbnails.
    pub store: Arc<dyn ObjectStore>,
    /// Plain HTTP client used to fetch stored objects by public URL.
    pub http: reqwest::Client,
}
