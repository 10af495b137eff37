//! OpenTelemetry-based observability with an in-memory span log.
//!
//! Spans emitted through `tracing` are bridged into OpenTelemetry and exported
//! as compact JSON records into a bounded [`SpanLog`] kept for the session:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → SessionSpanExporter → SpanLog
//! ```
//!
//! Nothing is persisted by this module. The host decides what to do with the
//! log; the terminal host appends it to `trace_file` on exit.
//!
//! # Configuration
//!
//! Trace level is taken from `Config::trace_level`, defaulting to `"info"`.
//! It accepts any `EnvFilter` directive, e.g. `"vitrine::viewer=trace,info"`.
//!
//! # Usage
//!
//! ```rust
//! use vitrine::observability::init_tracing;
//! use vitrine::Config;
//!
//! let log = init_tracing(&Config::default());
//! tracing::debug!("gallery initialized");
//! let _records: Vec<String> = log.drain();
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`formatter`]: JSON span records
//! - [`log`]: Bounded record buffer

mod exporter;
mod formatter;
mod init;
mod log;

pub use exporter::create_tracer_provider;
pub use init::init_tracing;
pub use log::{SpanLog, DEFAULT_CAPACITY};
