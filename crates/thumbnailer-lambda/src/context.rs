//! Process-wide handler context
//!
//! Built once at cold start and shared by every invocation. Nothing in it is
//! mutated after construction.

use std::sync::Arc;

use thumbnailer_core::Config;
use thumbnailer_storage::{create_storage, Storage, StorageResult};

pub struct HandlerContext {
    storage: Arc<dyn Storage>,
    dest_bucket: Option<String>,
}

impl HandlerContext {
    pub fn new(storage: Arc<dyn Storage>, dest_bucket: Option<String>) -> Self {
        Self {
            storage,
            dest_bucket,
        }
    }

    /// Create the storage client described by `config`.
    pub async fn from_config(config: &Config) -> StorageResult<Self> {
        let storage = create_storage(config).await?;

        if config.dest_bucket().is_none() {
            tracing::warn!("DEST_BUCKET is not set; thumbnail uploads will fail");
        }

        tracing::info!(
            backend = %storage.backend_type(),
            dest_bucket = config.dest_bucket().unwrap_or("-"),
            environment = %config.environment,
            "Handler context initialized"
        );

        Ok(Self::new(storage, config.dest_bucket.clone()))
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn dest_bucket(&self) -> Option<&str> {
        self.dest_bucket.as_deref()
    }
}
