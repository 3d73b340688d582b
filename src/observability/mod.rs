//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → bookfinder-spans.jsonl
//! ```
//!
//! Spans land in the plugin data directory, one JSON object per line. The
//! file rotates to a single `.1` backup past 4 MiB.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`log_file`]: Rotating line writer

mod exporter;
mod init;
mod log_file;

pub use init::{init_tracing, SPANS_FILE};
