//! One-line JSON rendering of finished spans.
//!
//! Each exported span becomes a single self-contained JSON object:
//!
//! ```json
//! {"ts":"2026-03-01T10:15:02.113+05:30","service":"saral","name":"dispatch",
//!  "traceId":"…","spanId":"…","parentSpanId":"…","durationUs":48211,
//!  "attributes":{"route":"ArticleLookup"},"events":[],"status":"ok"}
//! ```

use chrono::{DateTime, Local};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::time::SystemTime;

/// A finished span, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub ts: String,
    pub service: String,
    pub name: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub duration_us: u64,
    pub attributes: Map<String, JsonValue>,
    pub events: Vec<EventRecord>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub ts: String,
    pub name: String,
    pub attributes: Map<String, JsonValue>,
}

impl SpanRecord {
    pub fn from_span(span: &SpanData, service: &str) -> Self {
        let parent_span_id = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        Self {
            ts: timestamp(span.end_time),
            service: service.to_string(),
            name: span.name.to_string(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            duration_us,
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    ts: timestamp(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status: status(&span.status),
        }
    }

    /// Serializes the record as a single JSON line (no trailing newline).
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn timestamp(at: SystemTime) -> String {
    DateTime::<Local>::from(at).to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
}

fn attributes(pairs: &[KeyValue]) -> Map<String, JsonValue> {
    pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

/// Maps an attribute to its natural JSON type; arrays fall back to their
/// display form.
pub fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

fn status(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}
