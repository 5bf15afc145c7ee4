//! Domain models for the thumbnail pipeline.

pub mod key;
pub mod notification;

pub use key::{Extension, ResolvedKey};
pub use notification::{NotificationRecord, S3Notification};
