//! Error types for storage backends.

use thiserror::Error;

/// Errors that can occur while reading or writing stored objects.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure on the local backend.
    #[error("storage I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// S3 request failure. The SDK error is flattened to a message because
    /// its generic layers carry no extra value for callers.
    #[error("S3 request failed: {0}")]
    S3(String),

    /// No object exists under the requested key.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The key is empty, absolute, or tries to escape the storage root.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend selection or required settings are missing or malformed.
    #[error("invalid storage configuration: {0}")]
    Config(String),
}
