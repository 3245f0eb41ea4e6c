//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → popcorn-otlp.json
//! ```
//!
//! Each exported batch is written as one line of OTLP JSON to
//! `popcorn-otlp.json` in the plugin data directory. The file is rotated once
//! it grows past a size limit, and only a few timestamped backups are kept.
//!
//! The level comes from the `trace_level` plugin option and defaults to
//! `info`. Both the plugin and the worker call [`init_tracing`]; the second
//! call in the same process is a no-op.

mod export;
mod file_writer;
mod init;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "Popcorn";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "popcorn-otlp.json";
