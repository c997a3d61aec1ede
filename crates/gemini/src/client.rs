//! Gemini API client.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::GeminiError;
use crate::retry::{retry_with_backoff, DEFAULT_BACKOFF_BASE_MS, DEFAULT_MAX_ATTEMPTS};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImagePayload, Part,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("thumbsmith/", env!("CARGO_PKG_VERSION"));

/// Longest upstream error body we echo into our own error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Client for the Gemini `generateContent` endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_attempts: u32,
    backoff_base_ms: u64,
}

impl GeminiClient {
    /// Creates a client from environment configuration.
    ///
    /// | Variable | Required | Default | Description |
    /// |----------|----------|---------|-------------|
    /// | `GEMINI_API_KEY` | Yes | - | API key sent as `x-goog-api-key` |
    /// | `GEMINI_BASE_URL` | No | Google's v1beta endpoint | Override for proxies and tests |
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] if the key is unset or empty,
    /// or [`GeminiError::Http`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey)?;
        match std::env::var("GEMINI_BASE_URL") {
            Ok(base_url) => Self::with_base_url(api_key, &base_url),
            Err(_) => Self::new(api_key),
        }
    }

    /// Creates a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint, used by tests to point
    /// at a mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides retry timing. Tests set the base to zero so retries do
    /// not sleep.
    #[must_use]
    pub fn with_retry_backoff(mut self, max_attempts: u32, backoff_base_ms: u64) -> Self {
        self.max_attempts = max_attempts;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Generates text from a prompt, optionally grounded on input images.
    ///
    /// Rate limits are retried with backoff before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::NoText`] if the model replied without a text
    /// part, or any transport, API or retry failure.
    pub async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        images: &[ImagePayload],
    ) -> Result<String, GeminiError> {
        let response = retry_with_backoff(self.max_attempts, self.backoff_base_ms, || {
            self.request_generate(model, prompt, images, None)
        })
        .await?;
        response.first_text().ok_or(GeminiError::NoText)
    }

    /// Generates an image from a prompt and reference images.
    ///
    /// Rate limits are retried with backoff before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::NoImage`] if the model replied without inline
    /// image data, or any transport, API or retry failure.
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        references: &[ImagePayload],
    ) -> Result<ImagePayload, GeminiError> {
        let response = retry_with_backoff(self.max_attempts, self.backoff_base_ms, || {
            self.request_generate(model, prompt, references, Some(GenerationConfig::image_output()))
        })
        .await?;
        let inline = response.first_inline_image().ok_or(GeminiError::NoImage)?;
        Ok(inline.decode()?)
    }

    /// One `generateContent` round trip, no retries.
    async fn request_generate(
        &self,
        model: &str,
        prompt: &str,
        images: &[ImagePayload],
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let mut parts = vec![Part::text(prompt)];
        parts.extend(images.iter().map(Part::inline_image));
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config,
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiError::RateLimited);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: trim_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| GeminiError::Deserialize {
            context: "generateContent response",
            source,
        })
    }
}

/// Bounds upstream error bodies so they stay loggable.
fn trim_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_string()
    } else {
        let mut out: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = GeminiClient::with_base_url("key", "http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn trim_body_keeps_short_bodies() {
        assert_eq!(trim_body("  oops \n"), "oops");
    }

    #[test]
    fn trim_body_truncates_long_bodies() {
        let long = "x".repeat(2000);
        let trimmed = trim_body(&long);
        assert_eq!(trimmed.chars().count(), MAX_ERROR_BODY_CHARS + 3);
        assert!(trimmed.ends_with("..."));
    }
}
