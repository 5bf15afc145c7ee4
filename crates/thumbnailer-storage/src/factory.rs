#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
#[cfg(not(all(feature = "storage-s3", feature = "storage-local")))]
use crate::StorageError;
use crate::{Storage, StorageBackend, StorageResult};
use std::sync::Arc;
use thumbnailer_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let storage =
                S3Storage::new(config.s3_region.clone(), config.s3_endpoint.clone()).await;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(&config.local_storage_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_create_local_storage() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let root = temp_dir.path().join("buckets");
        let vars = HashMap::from([
            ("STORAGE_BACKEND".to_string(), "local".to_string()),
            (
                "LOCAL_STORAGE_PATH".to_string(),
                root.to_string_lossy().into_owned(),
            ),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(root.is_dir());
    }
}
