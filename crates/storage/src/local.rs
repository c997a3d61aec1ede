//! Local filesystem backend.
//!
//! Objects live under a root directory and are exposed through a public
//! base URL that something (the API's own static file mount, or a fronting
//! web server) maps back onto that directory.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::{ObjectStore, StoredObject};

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Maps a key onto a path under the root, rejecting escapes.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(key, size = bytes.len(), "Stored object on local backend");
        Ok(StoredObject {
            storage_path: key.to_string(),
            public_url: format!("{}/{key}", self.public_base_url),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;
        tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path(), "http://localhost:8080/files/")
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let stored = store
            .put("user-1/photo.jpg", b"jpeg bytes", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(stored.storage_path, "user-1/photo.jpg");
        assert_eq!(
            stored.public_url,
            "http://localhost:8080/files/user-1/photo.jpg"
        );

        let bytes = store.get("user-1/photo.jpg").await.unwrap();
        assert_eq!(bytes, b"jpeg bytes");
    }

    #[tokio::test]
    async fn nested_keys_create_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .put("user-1/thumbnails/1-concept-1.png", b"png", "image/png")
            .await
            .unwrap();
        assert!(dir.path().join("user-1/thumbnails/1-concept-1.png").exists());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let err = store.put("../outside.txt", b"x", "text/plain").await;
        assert_matches!(err, Err(StorageError::InvalidKey(_)));

        let err = store.get("/etc/passwd").await;
        assert_matches!(err, Err(StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let err = store.get("user-1/missing.png").await;
        assert_matches!(err, Err(StorageError::NotFound(_)));
    }
}
