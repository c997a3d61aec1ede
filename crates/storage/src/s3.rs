//! S3-compatible backend.

use async_trait::async_trait;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::StorageError;
use crate::{ObjectStore, StoredObject};

#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3Store {
    /// Wraps an already-configured SDK client.
    ///
    /// `public_base_url` is the prefix public URLs are built from, e.g.
    /// `https://my-bucket.s3.eu-west-1.amazonaws.com` or a CDN host.
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        public_base_url: &str,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|err| StorageError::S3(err.to_string()))?;
        tracing::debug!(key, size = bytes.len(), "Stored object on S3 backend");
        Ok(StoredObject {
            storage_path: key.to_string(),
            public_url: format!("{}/{key}", self.public_base_url),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let missing = err
                    .as_service_error()
                    .map(GetObjectError::is_no_such_key)
                    .unwrap_or(false);
                if missing {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::S3(err.to_string())
                }
            })?;
        let body = response
            .body
            .collect()
            .await
            .map_err(|err| StorageError::S3(err.to_string()))?;
        Ok(body.into_bytes().to_vec())
    }
}
