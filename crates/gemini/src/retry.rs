//! Retry with exponential backoff for rate-limited calls.

use std::future::Future;
use std::time::Duration;

use crate::error::GeminiError;

/// Total attempts per call, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base unit for backoff delays, in milliseconds.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;

/// Runs `operation` up to `max_attempts` times, sleeping between attempts
/// that fail with a rate limit.
///
/// The delay before retry `n` (zero-based) is `2^n * backoff_base_ms` plus
/// random jitter of up to one base unit, so with the default base the
/// sequence is roughly 1s, 2s, 4s. Non-rate-limit errors are returned
/// immediately without retrying. If every attempt is rate limited the call
/// resolves to [`GeminiError::RetriesExhausted`].
///
/// Tests pass `backoff_base_ms = 0` to exercise the retry loop without
/// sleeping.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GeminiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeminiError>>,
{
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limit() => {
                if attempt + 1 == max_attempts {
                    break;
                }
                let delay_ms = backoff_ms(attempt, backoff_base_ms);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms,
                    "Rate limited by Gemini API, backing off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
    Err(GeminiError::RetriesExhausted)
}

/// Delay before the retry following zero-based attempt `attempt`.
fn backoff_ms(attempt: u32, base_ms: u64) -> u64 {
    let exponential = (1u64 << attempt).saturating_mul(base_ms);
    let jitter = (rand::random::<f64>() * base_ms as f64) as u64;
    exponential + jitter
}
