//! Backend selection from environment configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aws_config::BehaviorVersion;

use crate::error::StorageError;
use crate::local::LocalStore;
use crate::s3::S3Store;
use crate::ObjectStore;

const DEFAULT_LOCAL_ROOT: &str = "./data/storage";
const DEFAULT_LOCAL_PUBLIC_URL: &str = "http://localhost:8080/files";

/// Which backend to run and how to reach it.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        endpoint_url: Option<String>,
        public_base_url: Option<String>,
    },
}

impl StorageConfig {
    /// Loads backend settings from the environment.
    ///
    /// | Variable | Required | Default | Description |
    /// |----------|----------|---------|-------------|
    /// | `STORAGE_BACKEND` | No | `local` | `local` or `s3` |
    /// | `STORAGE_ROOT` | No | `./data/storage` | Local backend root directory |
    /// | `STORAGE_PUBLIC_URL` | No | `http://localhost:8080/files` | Base URL mapped onto the local root |
    /// | `S3_BUCKET` | For s3 | - | Bucket name |
    /// | `S3_ENDPOINT_URL` | No | - | Override for S3-compatible services |
    /// | `S3_PUBLIC_URL` | No | virtual-hosted URL | Base URL for stored objects, e.g. a CDN host |
    ///
    /// AWS credentials and region follow the SDK's standard environment
    /// chain (`AWS_ACCESS_KEY_ID`, `AWS_REGION`, profiles, IMDS).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Config`] for an unknown backend name or a
    /// missing `S3_BUCKET`.
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".to_string());
        match backend.as_str() {
            "local" => Ok(Self::Local {
                root: std::env::var("STORAGE_ROOT")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_ROOT.to_string())
                    .into(),
                public_base_url: std::env::var("STORAGE_PUBLIC_URL")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_PUBLIC_URL.to_string()),
            }),
            "s3" => Ok(Self::S3 {
                bucket: std::env::var("S3_BUCKET").map_err(|_| {
                    StorageError::Config("S3_BUCKET is required for the s3 backend".to_string())
                })?,
                endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
                public_base_url: std::env::var("S3_PUBLIC_URL").ok(),
            }),
            other => Err(StorageError::Config(format!(
                "Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    /// Root directory of the local backend, if that is what is configured.
    ///
    /// The API mounts this directory as static files so the public URLs it
    /// hands out actually resolve.
    pub fn local_root(&self) -> Option<&Path> {
        match self {
            Self::Local { root, .. } => Some(root),
            Self::S3 { .. } => None,
        }
    }

    /// Builds the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the local root cannot be created.
    pub async fn build(&self) -> Result<Arc<dyn ObjectStore>, StorageError> {
        match self {
            Self::Local {
                root,
                public_base_url,
            } => {
                tokio::fs::create_dir_all(root)
                    .await
                    .map_err(|source| StorageError::Io {
                        path: root.display().to_string(),
                        source,
                    })?;
                tracing::info!(root = %root.display(), "Using local storage backend");
                Ok(Arc::new(LocalStore::new(root.clone(), public_base_url)))
            }
            Self::S3 {
                bucket,
                endpoint_url,
                public_base_url,
            } => {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(endpoint) = endpoint_url {
                    loader = loader.endpoint_url(endpoint);
                }
                let sdk_config = loader.load().await;
                let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
                if endpoint_url.is_some() {
                    // S3-compatible services usually want path-style addressing.
                    builder = builder.force_path_style(true);
                }
                let client = aws_sdk_s3::Client::from_conf(builder.build());

                let public_base = match public_base_url {
                    Some(base) => base.clone(),
                    None => {
                        let region = sdk_config
                            .region()
                            .map(|r| r.as_ref().to_string())
                            .unwrap_or_else(|| "us-east-1".to_string());
                        format!("https://{bucket}.s3.{region}.amazonaws.com")
                    }
                };
                tracing::info!(bucket, "Using S3 storage backend");
                Ok(Arc::new(S3Store::new(client, bucket.clone(), &public_base)))
            }
        }
    }
}
