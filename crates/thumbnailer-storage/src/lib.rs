//! Thumbnailer Storage Library
//!
//! Storage abstraction and implementations for the thumbnail pipeline: the
//! `Storage` trait plus S3 and local filesystem backends.
//!
//! # Addressing
//!
//! Every operation names a bucket and a key explicitly. Source objects live
//! in whichever bucket emitted the notification, thumbnails go to the
//! configured destination bucket, so one client serves both sides.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use thumbnailer_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
