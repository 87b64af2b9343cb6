//! Bridges records from the `log` facade into the masklog pipeline.
//!
//! Libraries that log through `log::info!` and friends end up filtered,
//! redacted and rendered exactly like records from the native macros. Call
//! sites come from the metadata the `log` macros capture at the call; an
//! error attached under the `error` or `exception` key is carried along as
//! exception info.

use crate::error::Result;
use crate::record::{CallSite, ExceptionInfo, LogRecord};
use crate::severity::Severity;
use crate::sink::{self, Sink};
use log::kv::{Key, Source};
use log::{LevelFilter, Log, Metadata, Record};
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

/// Targets under this prefix belong to masklog itself and are never bridged.
const INTERNAL_TARGET_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Keys searched, in order, for an attached error.
const EXCEPTION_KEYS: [&str; 2] = ["error", "exception"];

thread_local! {
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}

/// Facility-neutral shape of a record produced outside the native macros.
#[derive(Debug, Clone)]
pub struct LegacyRecord<'a> {
    pub level_name: &'a str,
    pub level_no: u32,
    pub message: String,
    pub logger_name: &'a str,
    pub call_site: CallSite,
    pub exception: Option<ExceptionInfo>,
}

impl LegacyRecord<'_> {
    /// Named tier for `level_name`, or the raw `level_no` when the name is not
    /// one masklog knows.
    pub fn severity(&self) -> Severity {
        Severity::from_name(self.level_name).unwrap_or(Severity::Level(self.level_no))
    }
}

/// Numeric level the `log` facade would report for each of its levels.
pub fn log_level_no(level: log::Level) -> u32 {
    Severity::from(level).rank()
}

enum Route {
    Default,
    Sink(Arc<Sink>),
}

/// Adapter from the `log` facade (or any other facility, through
/// [`LegacyRecord`]) to a masklog sink.
pub struct LoggingBridge {
    route: Route,
    filter: Option<env_logger::Logger>,
    diagnostics: Option<env_logger::Logger>,
}

impl LoggingBridge {
    /// A bridge forwarding to whichever sink is the process default at the
    /// time of each call.
    pub fn new() -> Self {
        Self { route: Route::Default, filter: None, diagnostics: None }
    }

    /// A bridge bound to one sink regardless of the process default.
    pub fn to_sink(sink: Arc<Sink>) -> Self {
        Self { route: Route::Sink(sink), filter: None, diagnostics: None }
    }

    /// Restricts bridged records with `env_logger` directives such as
    /// `hyper=warn,info`. Records the directives reject never reach the sink.
    pub fn with_directives(mut self, directives: &str) -> Self {
        self.filter = Some(env_logger::Builder::new().parse_filters(directives).build());
        self
    }

    /// Sends masklog's own records to `logger` instead of dropping them. They
    /// never reach a sink.
    pub fn with_diagnostics(mut self, logger: env_logger::Logger) -> Self {
        self.diagnostics = Some(logger);
        self
    }

    /// Installs the bridge as the global `log` implementation and opens the
    /// facade's max level so the sink's filter makes the decision.
    pub fn install(self) -> Result<()> {
        let bridged = self.filter.as_ref().map_or(LevelFilter::Trace, env_logger::Logger::filter);
        let internal = self.diagnostics.as_ref().map_or(LevelFilter::Off, env_logger::Logger::filter);
        let max_level = bridged.max(internal);
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Normalizes a record from a foreign facility and forwards it. Returns
    /// whether the sink emitted it.
    pub fn on_legacy_record(&self, record: LegacyRecord<'_>) -> bool {
        if FORWARDING.with(Cell::get) {
            return false;
        }
        FORWARDING.with(|flag| flag.set(true));

        let level = record.severity();
        let normalized = LogRecord::new(level, record.message, record.logger_name)
            .with_call_site(record.call_site)
            .with_exception(record.exception);
        let emitted = match &self.route {
            Route::Default => sink::dispatch(normalized),
            Route::Sink(sink) => sink.log(normalized),
        };

        FORWARDING.with(|flag| flag.set(false));
        emitted
    }

    fn is_internal(target: &str) -> bool {
        target.starts_with(INTERNAL_TARGET_PREFIX)
    }
}

impl Default for LoggingBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggingBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = match self.route {
            Route::Default => "default",
            Route::Sink(_) => "sink",
        };
        f.debug_struct("LoggingBridge")
            .field("route", &route)
            .field("filtered", &self.filter.is_some())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

fn call_site_of(record: &Record<'_>) -> CallSite {
    CallSite {
        module_path: record.module_path().map(str::to_string),
        file: record.file().map(str::to_string),
        function: None,
        line: record.line(),
    }
}

fn exception_of(record: &Record<'_>) -> Option<ExceptionInfo> {
    let kvs = record.key_values();
    EXCEPTION_KEYS.iter().find_map(|key| {
        let value = kvs.get(Key::from_str(key))?;
        value.to_borrowed_error().map(ExceptionInfo::capture)
    })
}

impl Log for LoggingBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        if Self::is_internal(metadata.target()) {
            return self.diagnostics.as_ref().is_some_and(|logger| logger.enabled(metadata));
        }
        self.filter.as_ref().map_or(true, |filter| filter.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if Self::is_internal(record.target()) {
            if let Some(logger) = &self.diagnostics {
                logger.log(record);
            }
            return;
        }
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(filter) = &self.filter {
            if !filter.matches(record) {
                return;
            }
        }

        let level = record.level();
        self.on_legacy_record(LegacyRecord {
            level_name: level.as_str(),
            level_no: log_level_no(level),
            message: record.args().to_string(),
            logger_name: record.target(),
            call_site: call_site_of(record),
            exception: exception_of(record),
        });
    }

    fn flush(&self) {
        match &self.route {
            Route::Default => {
                if let Some(sink) = sink::active_sink() {
                    sink.flush();
                }
            }
            Route::Sink(sink) => sink.flush(),
        }
        if let Some(logger) = &self.diagnostics {
            logger.flush();
        }
    }
}
