/// Handles argument parsing and the relay runner.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across the crate.
pub mod constants;

/// Configuration handling: file/env surface and the immutable sink config.
pub mod config;

/// Ordered severities.
pub mod severity;

/// The record type flowing through the pipeline.
pub mod record;

/// Masking of sensitive values in messages.
pub mod redact;

/// Severity gate that redacts as it decides.
pub mod filter;

/// Line formats and their selection.
pub mod format;

/// Output targets and the process-wide default sink.
pub mod sink;

/// Adapter from the `log` facade.
pub mod bridge;

/// Native logging macros.
pub mod macros;

#[doc(hidden)]
pub use macros::__private;

pub use bridge::{LegacyRecord, LoggingBridge};
pub use config::{LoggingConfig, SinkConfig};
pub use record::{CallSite, ExceptionInfo, LogRecord};
pub use severity::{LevelSpec, Severity};
pub use sink::{initialize, initialize_with, shutdown, CaptureBuffer, Sink, SinkHandle};
