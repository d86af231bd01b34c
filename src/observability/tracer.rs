//! OpenTelemetry tracer provider exporting to a local file.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_formatter::SpanRecord;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported span as one JSON line.
struct FileSpanExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(path: PathBuf, policy: RotationPolicy, service: &str) -> Self {
        Self {
            file: RotatingFile::new(path, policy),
            service: service.to_string(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> Result<(), TraceError> {
        for span in batch {
            let line = SpanRecord::from_span(span, &self.service)
                .to_line()
                .map_err(|e| TraceError::from(e.to_string()))?;
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("trace exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every span as soon as it closes.
pub fn create_tracer_provider(
    path: PathBuf,
    policy: RotationPolicy,
    service: &str,
) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service.to_string(),
    )]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(FileSpanExporter::new(path, policy, service))
        .build()
}
