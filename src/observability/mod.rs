//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → TracerProvider → OtlpFileExporter → RotatingFile
//! ```
//!
//! Spans land as OTLP JSON lines in
//! `~/.local/share/zellij/postboard/postboard-otlp.json` (seen from the
//! sandbox under `/host`). The file rotates at 10 MB and keeps three
//! backups. The level comes from the `trace_level` plugin option, default
//! `info`.

mod exporter;
mod init;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
