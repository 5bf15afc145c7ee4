//! Thumbnailer Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! constants shared by the storage, processing and Lambda crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::AppError;
pub use models::{Extension, NotificationRecord, ResolvedKey, S3Notification};
pub use storage_types::StorageBackend;
