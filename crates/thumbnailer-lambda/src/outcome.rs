//! Invocation outcome
//!
//! Every pipeline failure is folded into `Outcome::Failed` so the invocation
//! still completes normally. Only the logs and this value tell the caller
//! that nothing was written.

use serde::Serialize;
use thiserror::Error;
use thumbnailer_core::constants::SUCCESS_STATUS_CODE;
use thumbnailer_storage::StorageError;

/// Failure inside the fetch → resize → store boundary
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to fetch source image: {0}")]
    Fetch(StorageError),

    #[error("Failed to resize image: {0:#}")]
    Resize(anyhow::Error),

    #[error("Failed to store thumbnail: {0}")]
    Store(StorageError),
}

impl PipelineError {
    /// Pipeline stage that failed, used as a structured log field
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Resize(_) => "resize",
            PipelineError::Store(_) => "store",
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// Thumbnail written; carries the human-readable report
    Success(String),
    /// Record rejected by the format gate
    Skipped(String),
    Failed(PipelineError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Payload returned to the Lambda runtime: a response for successes,
    /// nothing (JSON `null`) for skips and failures.
    pub fn into_response(self) -> Option<InvocationResponse> {
        match self {
            Outcome::Success(message) => Some(InvocationResponse::ok(message)),
            Outcome::Skipped(_) | Outcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            body: body.into(),
        }
    }
}
