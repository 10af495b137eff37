//! Tracing initialization and subscriber setup.

use super::exporter::create_tracer_provider;
use super::log::SpanLog;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "vitrine";

static SESSION_LOG: OnceLock<SpanLog> = OnceLock::new();

/// Initializes the tracing subscriber and returns the session span log.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans by `config.trace_level` (default `"info"`)
/// 2. Bridges them into OpenTelemetry
/// 3. Exports each finished span as a JSON record into the returned log
///
/// # Initialization Behavior
///
/// - Idempotent: later calls return a handle onto the first call's log
/// - An unparsable level falls back to `"info"`
/// - If another global subscriber is already installed the log simply stays
///   empty; the caller is never failed
///
/// # Example
///
/// ```rust
/// use vitrine::observability::init_tracing;
/// use vitrine::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// let first = init_tracing(&config);
/// let again = init_tracing(&config);
/// first.push("marker".to_string());
/// assert!(!again.is_empty());
/// ```
pub fn init_tracing(config: &Config) -> SpanLog {
    SESSION_LOG
        .get_or_init(|| {
            let log = SpanLog::default();
            install(config, log.clone());
            log
        })
        .clone()
}

fn install(config: &Config, log: SpanLog) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let provider = create_tracer_provider(log, SERVICE_NAME);
    let tracer = provider.tracer(SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    let _ = subscriber.try_init();
}
