//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object body together with its declared content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    /// Content type recorded on the object, if any. Opaque to the pipeline.
    pub content_type: Option<String>,
}

impl StoredObject {
    pub fn new(data: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            content_type,
        }
    }
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait so
/// the thumbnail handler can run against either without knowing which one it
/// holds. Implementations are shared process-wide and must be safe to call
/// concurrently.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch an object's bytes and content type
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;

    /// Write an object, replacing any existing object at the same key.
    ///
    /// `content_type` is stored verbatim; `None` leaves it unset.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
