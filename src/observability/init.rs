//! Subscriber setup.

use super::exporter::file_tracer_provider;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File the spans are exported to, inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "postboard-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// [`TRACE_FILE_NAME`].
///
/// Observability is optional: if the data directory cannot be created or a
/// subscriber is already installed, this does nothing.
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![KeyValue::new("service.name", "Postboard")]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("Postboard"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
