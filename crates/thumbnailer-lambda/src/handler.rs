//! Thumbnail handler
//!
//! One record per invocation: resolve the key, gate on the extension, then
//! fetch → resize → store. Everything after the gate shares one failure
//! boundary that turns errors into `Outcome::Failed` instead of propagating.

use std::sync::Arc;

use lambda_runtime::LambdaEvent;
use thumbnailer_core::constants::THUMBNAIL_WIDTH;
use thumbnailer_core::{AppError, NotificationRecord, ResolvedKey, S3Notification};
use thumbnailer_processing::ThumbnailGenerator;
use thumbnailer_storage::StorageError;
use tracing::instrument;

use crate::context::HandlerContext;
use crate::outcome::{InvocationResponse, Outcome, PipelineError};

#[derive(Clone)]
pub struct ThumbnailHandler {
    context: Arc<HandlerContext>,
}

impl ThumbnailHandler {
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Entry point used by the Lambda runtime.
    pub async fn invoke(
        &self,
        event: LambdaEvent<S3Notification>,
    ) -> Result<Option<InvocationResponse>, lambda_runtime::Error> {
        tracing::debug!(request_id = %event.context.request_id, "Invocation received");
        self.handle_event(event.payload).await.map_err(|error| {
            tracing::error!(error = %error, error_code = error.error_code(), "Invocation rejected");
            error.into()
        })
    }

    /// Handle the first record of a notification.
    ///
    /// Any further records in the same notification are not processed.
    pub async fn handle_event(
        &self,
        event: S3Notification,
    ) -> Result<Option<InvocationResponse>, AppError> {
        let (record, ignored) = event.into_first_record()?;
        if ignored > 0 {
            tracing::debug!(ignored, "Only the first notification record is processed");
        }

        let outcome = self.handle(&record).await?;
        Ok(outcome.into_response())
    }

    /// Process one notification record.
    ///
    /// Returns `Err` only when the record itself is unusable (undecodable key).
    #[instrument(skip_all, fields(bucket = %record.source_bucket, key = %record.object_key))]
    pub async fn handle(&self, record: &NotificationRecord) -> Result<Outcome, AppError> {
        let key = record.resolve_key()?;
        let extension = key.extension();

        tracing::info!("{} - {}/{}", record.event_time, record.source_bucket, key);

        if !extension.is_supported() {
            let reason = format!("Unsupported file type ({})", extension);
            tracing::warn!(extension = %extension, "{}", reason);
            return Ok(Outcome::Skipped(reason));
        }

        match self.process(&record.source_bucket, &key).await {
            Ok(message) => {
                tracing::info!("{}", message);
                Ok(Outcome::Success(message))
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    stage = error.stage(),
                    source_bucket = %record.source_bucket,
                    resolved_key = %key,
                    "Thumbnail generation failed"
                );
                Ok(Outcome::Failed(error))
            }
        }
    }

    async fn process(
        &self,
        source_bucket: &str,
        key: &ResolvedKey,
    ) -> Result<String, PipelineError> {
        let storage = self.context.storage();

        let source = storage
            .get_object(source_bucket, key.as_str())
            .await
            .map_err(PipelineError::Fetch)?;

        let data = source.data.clone();
        let thumbnail =
            run_blocking(move || ThumbnailGenerator::generate(&data, THUMBNAIL_WIDTH)).await?;

        tracing::debug!(
            source_width = thumbnail.source_width,
            source_height = thumbnail.source_height,
            width = thumbnail.width,
            height = thumbnail.height,
            format = ?thumbnail.format,
            "Image resized"
        );

        let dest_bucket = self.context.dest_bucket().ok_or_else(|| {
            PipelineError::Store(StorageError::ConfigError(
                "DEST_BUCKET not configured".to_string(),
            ))
        })?;

        // The source content type is carried over as-is, even if it does not
        // match the format the thumbnail was encoded in.
        storage
            .put_object(
                dest_bucket,
                key.as_str(),
                thumbnail.data,
                source.content_type.as_deref(),
            )
            .await
            .map_err(PipelineError::Store)?;

        Ok(format!(
            "Successfully resized {}/{} and uploaded to {}/{}",
            source_bucket, key, dest_bucket, key
        ))
    }
}

/// Run CPU-bound image work off the async executor.
///
/// A panic inside the closure surfaces as a resize failure.
async fn run_blocking<T, F>(work: F) -> Result<T, PipelineError>
where
    F: FnOnce() -> Result<T, anyhow::Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| PipelineError::Resize(anyhow::Error::new(e).context("Resize task aborted")))?
        .map_err(PipelineError::Resize)
}
