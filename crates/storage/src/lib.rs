//! Object storage for reference photos and generated thumbnails.
//!
//! The [`ObjectStore`] trait abstracts over a local filesystem backend for
//! development and an S3-compatible backend for production. Stored objects
//! are addressed by a relative key and exposed through a public URL that is
//! persisted alongside the database row.

use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod keys;
pub mod local;
pub mod s3;

pub use config::StorageConfig;
pub use error::StorageError;
pub use local::LocalStore;
pub use s3::S3Store;

/// Where an object ended up after a [`ObjectStore::put`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Backend-relative key, e.g. `"{user_id}/1714670000000-face.jpg"`.
    pub storage_path: String,
    /// Publicly reachable URL for the object.
    pub public_url: String,
}

/// Storage backend for image bytes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` under `key` and returns where they landed.
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Reads the bytes previously stored under `key`.
    ///
    /// Returns [`StorageError::NotFound`] when no object exists there.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}
