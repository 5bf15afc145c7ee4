//! Configuration module
//!
//! Settings are read once at process start and shared read-only with every
//! invocation. Only the storage backend selection is validated here: a missing
//! `DEST_BUCKET` is tolerated and surfaces later as a store failure.

use std::env;

use crate::error::AppError;
use crate::storage_types::StorageBackend;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_LOCAL_STORAGE_PATH: &str = "./storage";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Process-wide configuration for the thumbnail function
#[derive(Clone, Debug)]
pub struct Config {
    /// Bucket receiving thumbnails. Not validated at startup.
    pub dest_bucket: Option<String>,
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, LocalStack, ...)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: String,
    pub log_format: LogFormat,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage_backend = match non_empty("STORAGE_BACKEND") {
            Some(value) => value
                .parse()
                .map_err(|e: anyhow::Error| AppError::Config(format!("STORAGE_BACKEND: {}", e)))?,
            None => StorageBackend::default(),
        };

        Ok(Config {
            dest_bucket: non_empty("DEST_BUCKET"),
            storage_backend,
            s3_region: non_empty("S3_REGION").or_else(|| non_empty("AWS_REGION")),
            s3_endpoint: non_empty("S3_ENDPOINT"),
            local_storage_path: non_empty("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            log_format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            environment: non_empty("ENVIRONMENT")
                .or_else(|| non_empty("APP_ENV"))
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        })
    }

    pub fn dest_bucket(&self) -> Option<&str> {
        self.dest_bucket.as_deref()
    }
}
