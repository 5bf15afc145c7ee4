//! Error types module
//!
//! `AppError` covers failures that happen before the thumbnail pipeline's
//! catch boundary: a malformed event or an object key that cannot be decoded.
//! These abort the invocation. Failures inside the pipeline (fetch, resize,
//! store) are reported through the handler outcome instead. Startup
//! configuration problems use the `Config` variant.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid object key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Machine-readable error code, used as a structured log field
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidEvent(_) => "INVALID_EVENT",
            AppError::InvalidKey { .. } => "INVALID_KEY",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}
