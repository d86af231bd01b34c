//! Subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::infrastructure::resolve_data_path;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "saral";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter`, a compact stderr
/// formatter and, when `trace_file` is set, span export to that file.
///
/// The level comes from `RUST_LOG`, then `config.trace_level`, then `info`.
/// Calling this again is a no-op. Returns whether file export is active.
///
/// ```rust
/// use saral::observability::init_tracing;
/// use saral::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let filter = build_filter(config.trace_level.as_deref());

    let otel_layer = config.trace_file.as_deref().map(|file| {
        let path = resolve_data_path(file);
        let provider =
            tracer::create_tracer_provider(path, RotationPolicy::default(), SERVICE_NAME);
        let tracer = provider.tracer(SERVICE_NAME);
        let _ = opentelemetry::global::set_tracer_provider(provider);
        OpenTelemetryLayer::new(tracer)
    });
    let exporting = otel_layer.is_some();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(exporting, "tracing initialised");
    }
    installed && exporting
}

/// Flushes and shuts down the span exporter, if one was installed.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}

fn build_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
