//! Tracing setup for hosts embedding the sequencer.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,beatline_narrative=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a tracing subscriber with an OpenTelemetry stdout span exporter
/// and a human-readable fmt layer.
///
/// `host` names the embedding application in exported spans. Both layers
/// honour `RUST_LOG`.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry(host: &str) -> Result<(), Box<dyn std::error::Error>> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            host.to_string(),
        )]))
        .build();

    let tracer = provider.tracer("beatline");
    opentelemetry::global::set_tracer_provider(provider);

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(env_filter());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(host, "Telemetry initialized");
    Ok(())
}

/// Flush pending spans. Call before the host exits.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}
