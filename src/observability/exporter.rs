//! OpenTelemetry span exporter writing one JSON object per finished span.
//!
//! Each line of the output file is a self-contained document:
//!
//! ```json
//! {"service":"bookfinder","traceId":"…","spanId":"…","parentSpanId":"…",
//!  "name":"handle_event","startTimeUnixNano":"…","durationNanos":"…",
//!  "attributes":{"screen":"SEARCH"},"events":[…],"status":"unset"}
//! ```

use super::log_file::LogFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

/// Span exporter appending JSON lines to a rotating [`LogFile`].
struct JsonLinesExporter {
    file: LogFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get("service.name".into())
            .map_or_else(|| "unknown".to_string(), |v| v.as_str().into_owned());

        Self {
            file: LogFile::new(file_path),
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> std::io::Result<()> {
        for span in batch {
            let mut line = span_to_json(span);
            if let JsonValue::Object(fields) = &mut line {
                fields.insert("service".into(), JsonValue::String(self.service.clone()));
            }
            self.file.append_line(&line.to_string())?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .write_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports every span as soon as it ends.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

fn span_to_json(span: &SpanData) -> JsonValue {
    let duration = span
        .end_time
        .duration_since(span.start_time)
        .unwrap_or(Duration::ZERO);

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            serde_json::json!({
                "name": event.name,
                "timeUnixNano": unix_nanos(event.timestamp).to_string(),
                "attributes": attributes_to_json(&event.attributes),
            })
        })
        .collect();

    serde_json::json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        "name": span.name,
        "startTimeUnixNano": unix_nanos(span.start_time).to_string(),
        "durationNanos": duration.as_nanos().to_string(),
        "attributes": attributes_to_json(&span.attributes),
        "events": events,
        "status": status_to_json(&span.status),
    })
}

/// Flattens key/value pairs into a JSON object; later keys win.
fn attributes_to_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_to_json(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f)
            .map_or_else(|| JsonValue::String(f.to_string()), JsonValue::Number),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

fn status_to_json(status: &Status) -> JsonValue {
    match status {
        Status::Unset => JsonValue::String("unset".into()),
        Status::Ok => JsonValue::String("ok".into()),
        Status::Error { description } => serde_json::json!({ "error": description.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_flatten_to_typed_json() {
        let attrs = [
            KeyValue::new("screen", "RESULTS"),
            KeyValue::new("loaded", 20_i64),
            KeyValue::new("rating", 3.5),
            KeyValue::new("has_more", true),
        ];

        let json = attributes_to_json(&attrs);
        assert_eq!(
            json,
            serde_json::json!({
                "screen": "RESULTS",
                "loaded": 20,
                "rating": 3.5,
                "has_more": true,
            })
        );
    }

    #[test]
    fn non_finite_floats_become_strings() {
        assert_eq!(value_to_json(&Value::F64(f64::NAN)), JsonValue::String("NaN".into()));
    }

    #[test]
    fn status_encoding() {
        assert_eq!(status_to_json(&Status::Unset), serde_json::json!("unset"));
        assert_eq!(
            status_to_json(&Status::error("boom")),
            serde_json::json!({ "error": "boom" })
        );
    }

    #[test]
    fn service_name_comes_from_resource() {
        let dir = tempfile::tempdir().unwrap();
        let resource = Resource::new(vec![KeyValue::new("service.name", "bookfinder")]);
        let exporter = JsonLinesExporter::new(dir.path().join("spans.jsonl"), &resource);
        assert_eq!(exporter.service, "bookfinder");
    }
}
