use crate::{
    bridge::LoggingBridge,
    cli::{args::get_level_from_verbose, Args},
    config::LoggingConfig,
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    severity::{LevelSpec, Severity},
    sink::{initialize_with, shutdown, stdout_target},
};
use log::{debug, warn, LevelFilter};
use std::borrow::Cow;
use std::io::{BufRead, Write};

/// Target used for messages relayed through the `log` facade.
pub const RELAY_TARGET: &str = "relay";

/// Relays text through the masklog pipeline.
pub struct Runner {
    args: Args,
    diagnostics: Option<env_logger::Logger>,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args, diagnostics: None }
    }

    /// Logger that receives masklog's own records once the bridge is
    /// installed. Without one, those records are dropped under `--via-bridge`.
    pub fn with_diagnostics(mut self, logger: env_logger::Logger) -> Self {
        self.diagnostics = Some(logger);
        self
    }

    /// Reads stdin when no messages were given and writes to stdout.
    pub fn run(self) -> Result<usize> {
        let stdin = std::io::stdin();
        self.run_with(stdin.lock(), stdout_target())
    }

    /// Relays every message (or every line of `input`) into a default sink
    /// writing to `target`. Returns how many messages were relayed.
    pub fn run_with<R, W>(mut self, input: R, target: W) -> Result<usize>
    where
        R: BufRead,
        W: Write + Send + 'static,
    {
        let config = self.resolve_config()?;

        if self.args.via_bridge {
            let mut bridge = match config.bridge_filter.as_deref() {
                Some(directives) => LoggingBridge::new().with_directives(directives),
                None => LoggingBridge::new(),
            };
            if let Some(logger) = self.diagnostics.take() {
                bridge = bridge.with_diagnostics(logger);
            }
            bridge.install()?;
            // Records from config loading predate the bridge; restate the result.
            debug!("Relaying through the `log` bridge with {config:?}");

            let level = self.args.emit_level;
            if facade_equivalent(level).is_none() {
                warn!(
                    "--emit-level {level} has no `log` facade equivalent; relaying as {}",
                    Severity::from(to_log_level(level))
                );
            }
        }

        let handle = initialize_with(config.into_sink_config(), target)?;
        let relayed = self.relay(input);
        shutdown(handle);
        relayed
    }

    /// Layers the configuration: defaults or file, then environment, then
    /// command line flags.
    pub fn resolve_config(&self) -> Result<LoggingConfig> {
        let config = match &self.args.config {
            Some(path) => LoggingConfig::load(path)?,
            None => match LoggingConfig::discover(std::env::current_dir()?) {
                Ok(config) => config,
                Err(Error::ConfigNotFound { .. }) => {
                    debug!("No configuration file found, using defaults.");
                    LoggingConfig::default()
                }
                Err(err) => return Err(err),
            },
        };
        Ok(self.apply_args(config.with_env_overrides()))
    }

    fn apply_args(&self, mut config: LoggingConfig) -> LoggingConfig {
        if let Some(level) = &self.args.level {
            config.min_level = match level.trim().parse::<u32>() {
                Ok(rank) => LevelSpec::Rank(rank),
                Err(_) => LevelSpec::Name(level.clone()),
            };
        } else if let Some(level) = get_level_from_verbose(self.args.verbose) {
            config.min_level = level.into();
        }
        if !self.args.sensitive_keys.is_empty() {
            config.sensitive_keys = self.args.sensitive_keys.iter().cloned().collect();
        }
        if let Some(label) = &self.args.project_label {
            config.project_label = label.clone();
        }
        if let Some(color) = self.args.color {
            config.color = color;
        }
        config
    }

    fn relay<R: BufRead>(&self, input: R) -> Result<usize> {
        let reads_stdin = self.args.messages.is_empty()
            || self.args.messages.iter().all(|message| message == STDIN_INDICATOR);

        let mut relayed = 0;
        if reads_stdin {
            for line in input.split(b'\n') {
                self.emit(&decode_line(&line?));
                relayed += 1;
            }
        } else {
            for message in &self.args.messages {
                self.emit(message);
                relayed += 1;
            }
        }
        Ok(relayed)
    }

    fn emit(&self, message: &str) {
        let level = self.args.emit_level;
        if self.args.via_bridge {
            log::log!(target: RELAY_TARGET, to_log_level(level), "{message}");
        } else {
            crate::log!(level, "{message}");
        }
    }
}

/// Decodes one raw input line. Invalid UTF-8 is replaced rather than ending
/// the relay, and a trailing `\r` is dropped.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Nearest `log` facade level for a severity.
pub fn to_log_level(level: Severity) -> log::Level {
    match level.rank() {
        40.. => log::Level::Error,
        30..=39 => log::Level::Warn,
        20..=29 => log::Level::Info,
        10..=19 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

/// The `log` facade level that renders back as exactly `level`, if any.
pub fn facade_equivalent(level: Severity) -> Option<log::Level> {
    if matches!(level, Severity::Level(_)) {
        return None;
    }
    let candidate = to_log_level(level);
    (Severity::from(candidate) == level).then_some(candidate)
}

/// Builds the stderr logger for masklog's own diagnostics. `RUST_LOG`
/// directives apply when set, otherwise masklog warnings are shown; `verbose`
/// enables DEBUG for masklog on top.
pub fn diagnostics_logger(verbose: bool) -> env_logger::Logger {
    let crate_name = env!("CARGO_CRATE_NAME");
    let mut builder = env_logger::Builder::new();
    match std::env::var(env_logger::DEFAULT_FILTER_ENV) {
        Ok(directives) => {
            builder.parse_filters(&directives);
        }
        Err(_) => {
            builder.filter_module(crate_name, LevelFilter::Warn);
        }
    }
    if verbose {
        builder.filter_module(crate_name, LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorMode;
    use clap::Parser;
    use log::Log;

    #[test]
    fn maps_severities_to_facade_levels() {
        assert_eq!(to_log_level(Severity::Critical), log::Level::Error);
        assert_eq!(to_log_level(Severity::Warning), log::Level::Warn);
        assert_eq!(to_log_level(Severity::Success), log::Level::Info);
        assert_eq!(to_log_level(Severity::Debug), log::Level::Debug);
        assert_eq!(to_log_level(Severity::Level(0)), log::Level::Trace);
    }

    #[test]
    fn only_facade_levels_have_equivalents() {
        assert_eq!(facade_equivalent(Severity::Warning), Some(log::Level::Warn));
        assert_eq!(facade_equivalent(Severity::Trace), Some(log::Level::Trace));
        assert_eq!(facade_equivalent(Severity::Critical), None);
        assert_eq!(facade_equivalent(Severity::Success), None);
        assert_eq!(facade_equivalent(Severity::Level(20)), None);
    }

    #[test]
    fn verbose_diagnostics_enable_crate_debug_records() {
        let logger = diagnostics_logger(true);
        let metadata = log::Metadata::builder()
            .target("masklog::config::loader")
            .level(log::Level::Debug)
            .build();
        assert!(logger.enabled(&metadata));
    }

    #[test]
    fn decodes_invalid_utf8_lossily() {
        assert_eq!(decode_line(b"token=abc\r"), "token=abc");
        assert_eq!(decode_line(b"\xff ok"), "\u{fffd} ok");
    }

    #[test]
    fn flags_override_configuration() {
        let args = Args::parse_from([
            "masklog",
            "-l",
            "30",
            "-k",
            "token",
            "-p",
            "billing",
            "--color",
            "always",
            "-v",
            "x",
        ]);
        let config = Runner::new(args).apply_args(LoggingConfig::default());
        assert_eq!(config.min_level, LevelSpec::Rank(30));
        assert_eq!(config.sensitive_keys.iter().collect::<Vec<_>>(), vec!["token"]);
        assert_eq!(config.project_label, "billing");
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn verbosity_applies_without_explicit_level() {
        let args = Args::parse_from(["masklog", "-vv", "x"]);
        let config = Runner::new(args).apply_args(LoggingConfig::default());
        assert_eq!(config.min_level.resolve(), Severity::Trace);
        assert_eq!(config.sensitive_keys.iter().collect::<Vec<_>>(), vec!["Cookie"]);
    }
}
