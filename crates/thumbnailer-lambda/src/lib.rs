//! Thumbnail Lambda function
//!
//! Receives S3 object-created notifications, and for supported images writes
//! a 200px-wide thumbnail under the same key in the destination bucket.

pub mod context;
pub mod handler;
pub mod outcome;
pub mod telemetry;

pub use context::HandlerContext;
pub use handler::ThumbnailHandler;
pub use outcome::{InvocationResponse, Outcome, PipelineError};
