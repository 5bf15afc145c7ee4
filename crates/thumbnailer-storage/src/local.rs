use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Directory under the base path holding content-type sidecar files
const METADATA_DIR: &str = ".content-types";

/// Local filesystem storage implementation
///
/// Buckets are sub-directories of `base_path` and keys are relative paths
/// inside them. Content types are kept in sidecar files under
/// `{base_path}/.content-types/{bucket}/{key}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory containing one directory per bucket
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Validate that a bucket name maps to exactly one directory
    fn validate_bucket(bucket: &str) -> StorageResult<()> {
        if bucket.is_empty()
            || bucket.starts_with('.')
            || bucket.contains('/')
            || bucket.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "Invalid bucket name: {:?}",
                bucket
            )));
        }
        Ok(())
    }

    /// Convert bucket and key to a relative path with traversal checks
    fn relative_path(bucket: &str, key: &str) -> StorageResult<PathBuf> {
        Self::validate_bucket(bucket)?;

        if key.is_empty() || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key must be a non-empty relative path".to_string(),
            ));
        }

        let key_path = Path::new(key);
        if key_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        Ok(Path::new(bucket).join(key_path))
    }

    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        Ok(self.base_path.join(Self::relative_path(bucket, key)?))
    }

    fn content_type_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        Ok(self
            .base_path
            .join(METADATA_DIR)
            .join(Self::relative_path(bucket, key)?))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        self.ensure_parent_dir(path).await?;

        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let content_type = match fs::read_to_string(self.content_type_path(bucket, key)?).await {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read content type for {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(StoredObject::new(data, content_type))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let content_type_path = self.content_type_path(bucket, key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        self.write_file(&path, &data).await?;

        match content_type {
            Some(content_type) => {
                self.write_file(&content_type_path, content_type.as_bytes())
                    .await?
            }
            None => match fs::remove_file(&content_type_path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::IoError(e)),
            },
        }

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
