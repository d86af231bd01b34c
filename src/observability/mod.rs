//! Logging and trace export.
//!
//! Every component logs through `tracing`. The subscriber installed here
//! prints events to stderr and, when a trace file is configured, also exports
//! finished spans through OpenTelemetry to a local JSON-lines file:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → traces.jsonl
//! ```
//!
//! The trace file rotates by size and keeps a few timestamped backups.
//! Relative trace file paths are placed under the data directory
//! (`~/.local/share/saral`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with file export
//! - [`span_formatter`]: One-line JSON span records
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, shutdown_tracing};
