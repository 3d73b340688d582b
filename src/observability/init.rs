//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span log inside the data directory.
pub const SPANS_FILE: &str = "bookfinder-spans.jsonl";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` in front of an OpenTelemetry layer exporting to
/// [`SPANS_FILE`].
///
/// Does nothing when the data directory cannot be created. Only the first
/// call takes effect.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "bookfinder",
    )]);

    let provider = exporter::create_tracer_provider(data_dir.join(SPANS_FILE), resource);
    let tracer = provider.tracer("bookfinder");

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.trace_level))
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
