//! Native logging front-end.
//!
//! The macros capture their call site (module, file, enclosing function,
//! line) where they are invoked and hand the record to the default sink, or
//! to an explicit one with the `sink:` form.
//!
//! ```no_run
//! use masklog::{initialize, shutdown, SinkConfig};
//!
//! let handle = initialize(SinkConfig::new("INFO").with_sensitive_keys(["token"])).unwrap();
//! masklog::info!("refreshed credentials token={}", "abcdefghijkl");
//! if let Err(err) = "x".parse::<u8>() {
//!     masklog::exception!(err, "could not parse the retry count");
//! }
//! shutdown(handle);
//! ```

/// Logs at an explicit level: `log!(Severity::Info, "...")` or
/// `log!(sink: &sink, Severity::Info, "...")`.
#[macro_export]
macro_rules! log {
    (sink: $sink:expr, $level:expr, $($arg:tt)+) => {
        $crate::__private::log_to(
            &$sink,
            $level,
            ::std::format_args!($($arg)+),
            $crate::call_site!(),
            ::std::option::Option::None,
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__private::dispatch(
            $level,
            ::std::format_args!($($arg)+),
            $crate::call_site!(),
            ::std::option::Option::None,
        )
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Info, $($arg)+) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Success, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Error, $($arg)+) };
}

#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Critical, $($arg)+) };
}

/// Logs at ERROR with `$err` attached as exception info.
#[macro_export]
macro_rules! exception {
    ($err:expr, $($arg:tt)+) => {
        $crate::__private::dispatch(
            $crate::Severity::Error,
            ::std::format_args!($($arg)+),
            $crate::call_site!(),
            ::std::option::Option::Some($crate::ExceptionInfo::capture(&$err)),
        )
    };
}

/// The [`CallSite`](crate::CallSite) of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(
            ::std::module_path!(),
            ::std::file!(),
            $crate::__function_name!(),
            ::std::line!(),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        $crate::__private::function_name(::std::any::type_name_of_val(&__here))
    }};
}

#[doc(hidden)]
pub mod __private {
    use crate::record::{CallSite, ExceptionInfo, LogRecord};
    use crate::severity::Severity;
    use crate::sink::{self, Sink};
    use std::fmt;

    fn build(
        level: Severity,
        args: fmt::Arguments<'_>,
        call_site: CallSite,
        exception: Option<ExceptionInfo>,
    ) -> LogRecord {
        let logger_name = call_site.module_path.clone().unwrap_or_default();
        LogRecord::new(level, args.to_string(), logger_name)
            .with_call_site(call_site)
            .with_exception(exception)
    }

    pub fn dispatch(
        level: Severity,
        args: fmt::Arguments<'_>,
        call_site: CallSite,
        exception: Option<ExceptionInfo>,
    ) -> bool {
        match sink::active_sink() {
            Some(sink) => sink.log(build(level, args, call_site, exception)),
            None => false,
        }
    }

    pub fn log_to(
        sink: &Sink,
        level: Severity,
        args: fmt::Arguments<'_>,
        call_site: CallSite,
        exception: Option<ExceptionInfo>,
    ) -> bool {
        sink.log(build(level, args, call_site, exception))
    }

    /// `app::jobs::run::{{closure}}::__here` -> `run`
    pub fn function_name(path: &'static str) -> &'static str {
        let mut path = path.strip_suffix("::__here").unwrap_or(path);
        while let Some(outer) = path.strip_suffix("::{{closure}}") {
            path = outer;
        }
        path.rsplit("::").next().unwrap_or(path)
    }
}
