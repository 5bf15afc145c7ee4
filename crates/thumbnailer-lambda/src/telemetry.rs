use thumbnailer_core::LogFormat;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str =
    "warn,thumbnailer_lambda=info,thumbnailer_storage=info,thumbnailer_processing=info,lambda_runtime=info";

/// Initialize tracing for the function.
///
/// `RUST_LOG` overrides the default filter. JSON output is meant for
/// CloudWatch, which stamps each line itself, so timestamps are omitted there.
pub fn init_telemetry(format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).try_init(),
    }
}
