use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use thumbnailer_core::{Config, S3Notification};
use thumbnailer_lambda::telemetry::init_telemetry;
use thumbnailer_lambda::{HandlerContext, ThumbnailHandler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    init_telemetry(config.log_format)?;

    // Storage client and destination bucket live for the whole process
    let context = Arc::new(HandlerContext::from_config(&config).await?);
    let handler = ThumbnailHandler::new(context);

    run(service_fn(|event: LambdaEvent<S3Notification>| {
        handler.invoke(event)
    }))
    .await
}
