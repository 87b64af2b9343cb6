//! The output side of the pipeline: one target plus its filter and format.
//!
//! - `target`: output targets (stdout, in-memory capture)
//! - `registry`: the process-wide default sink and its lifecycle

pub mod registry;
pub mod target;

pub use registry::{active_sink, dispatch, initialize, initialize_with, register, shutdown, SinkHandle};
pub use target::{stdout_target, CaptureBuffer, OutputTarget};

use crate::config::SinkConfig;
use crate::error::Result;
use crate::filter::SeverityFilter;
use crate::format::{select_format, RecordRenderer};
use crate::record::LogRecord;
use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// A configured output target.
///
/// Filtering and redaction run on the calling thread; rendering and writing
/// happen under the target's lock so concurrent lines never interleave.
pub struct Sink {
    config: SinkConfig,
    filter: SeverityFilter,
    renderer: Box<dyn RecordRenderer>,
    target: Mutex<OutputTarget>,
}

impl Sink {
    pub fn new<W>(config: SinkConfig, target: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let filter = SeverityFilter::new(&config)?;
        let renderer = select_format(&config);
        Ok(Self { config, filter, renderer, target: Mutex::new(Box::new(target)) })
    }

    /// A sink writing to standard output.
    pub fn stdout(config: SinkConfig) -> Result<Self> {
        Self::new(config, stdout_target())
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Name of the selected format.
    pub fn format_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// Runs a record through filter, format and target. Returns whether the
    /// record was emitted.
    pub fn log(&self, mut record: LogRecord) -> bool {
        if !self.filter.should_emit(&mut record) {
            return false;
        }

        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        let mut line = self.renderer.render(&record);
        line.push('\n');
        if let Err(err) = target.write_all(line.as_bytes()) {
            eprintln!("masklog: failed to write log record: {err}");
            return false;
        }
        true
    }

    pub fn flush(&self) {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = target.flush() {
            eprintln!("masklog: failed to flush log target: {err}");
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("config", &self.config)
            .field("format", &self.renderer.name())
            .finish_non_exhaustive()
    }
}
