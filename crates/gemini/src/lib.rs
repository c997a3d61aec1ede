//! HTTP client for the Google Gemini generative API.
//!
//! Wraps the `generateContent` REST endpoint for both text and image
//! generation. Rate-limited calls (HTTP 429) are retried with exponential
//! backoff; every other failure surfaces immediately as a [`GeminiError`].

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::ImagePayload;
