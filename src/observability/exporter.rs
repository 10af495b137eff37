//! OpenTelemetry span exporter writing into a [`SpanLog`].

use super::formatter::SpanFormatter;
use super::log::SpanLog;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exports every finished span as one JSON record into the session log.
#[derive(Debug)]
struct SessionSpanExporter {
    log: SpanLog,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl SessionSpanExporter {
    fn new(log: SpanLog, service: &str) -> Self {
        Self {
            log,
            formatter: SpanFormatter::new(service),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for SessionSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        for span in &batch {
            self.log.push(self.formatter.format_span(span).to_string());
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        let _ = res;
    }
}

/// Creates a tracer provider exporting synchronously into `log`.
///
/// `service` names both the resource and every record's `service` field.
#[must_use]
pub fn create_tracer_provider(log: SpanLog, service: &str) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service.to_string(),
    )]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(SessionSpanExporter::new(log, service))
        .build()
}
