//! Error types for Gemini API calls.

use thiserror::Error;

/// Errors that can occur when calling the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// `GEMINI_API_KEY` is missing or empty.
    #[error("GEMINI_API_KEY not configured")]
    MissingApiKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status other than 429.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The API returned HTTP 429. Retried by [`retry_with_backoff`].
    ///
    /// [`retry_with_backoff`]: crate::retry::retry_with_backoff
    #[error("Gemini API rate limit exceeded")]
    RateLimited,

    /// The response body did not match the expected wire shape.
    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The response contained no text part.
    #[error("Gemini response contained no text")]
    NoText,

    /// The response contained no inline image data.
    #[error("Gemini response contained no image data")]
    NoImage,

    /// Inline image data was not valid base64.
    #[error("invalid inline image payload: {0}")]
    InvalidImagePayload(#[from] base64::DecodeError),

    /// All retry attempts were consumed by rate-limit responses.
    #[error("Max retries exceeded")]
    RetriesExhausted,
}

impl GeminiError {
    /// Whether this failure is worth retrying.
    ///
    /// Only rate limits qualify. Auth errors, bad requests and malformed
    /// responses will not get better on a second attempt.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GeminiError::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_retryable() {
        assert!(GeminiError::RateLimited.is_rate_limit());
    }

    #[test]
    fn api_error_is_not_retryable() {
        let err = GeminiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_rate_limit());
        assert_eq!(err.to_string(), "Gemini API error (status 500): boom");
    }

    #[test]
    fn exhausted_message_is_terminal() {
        assert_eq!(
            GeminiError::RetriesExhausted.to_string(),
            "Max retries exceeded"
        );
    }
}
