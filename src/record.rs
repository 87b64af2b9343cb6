//! The fixed-shape record that flows through the pipeline.

use crate::severity::Severity;
use chrono::{DateTime, Local};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;

/// Where a log call was made. Every part is optional because records coming
/// through the bridge may not carry all of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSite {
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub function: Option<String>,
    pub line: Option<u32>,
}

impl CallSite {
    /// Call site captured by the native macros.
    pub fn new(module_path: &str, file: &str, function: &str, line: u32) -> Self {
        Self {
            module_path: Some(module_path.to_string()),
            file: Some(file.to_string()),
            function: (!function.is_empty()).then(|| function.to_string()),
            line: Some(line),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.module_path.is_none()
            && self.file.is_none()
            && self.function.is_none()
            && self.line.is_none()
    }
}

/// Snapshot of an error attached to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    pub type_name: String,
    pub message: String,
    /// Messages of the `source()` chain, outermost first.
    pub causes: Vec<String>,
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Captures an error together with its source chain. A backtrace is taken
    /// only when the process has backtraces enabled.
    pub fn capture<E>(err: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            type_name: short_type_name(std::any::type_name::<E>()),
            message: err.to_string(),
            causes,
            backtrace,
        }
    }

    /// One-line form used by the compact format.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.type_name, self.message)
    }
}

/// `std::io::error::Error` -> `Error`, `dyn core::error::Error` -> `Error`.
fn short_type_name(full: &str) -> String {
    let base = full.split(['<', ' ']).find(|part| !part.is_empty() && *part != "dyn");
    let base = base.unwrap_or(full).trim_start_matches('&');
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// A single log record.
///
/// Only the message can change after capture, and only through redaction in
/// the filter stage.
#[derive(Debug, Clone)]
pub struct LogRecord {
    message: String,
    level: Severity,
    logger_name: String,
    call_site: CallSite,
    exception: Option<ExceptionInfo>,
    time: DateTime<Local>,
}

impl LogRecord {
    pub fn new(level: Severity, message: impl Into<String>, logger_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            logger_name: logger_name.into(),
            call_site: CallSite::default(),
            exception: None,
            time: Local::now(),
        }
    }

    pub fn with_call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = call_site;
        self
    }

    pub fn with_exception(mut self, exception: Option<ExceptionInfo>) -> Self {
        self.exception = exception;
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }
}
