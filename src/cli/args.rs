use crate::config::ColorMode;
use crate::constants::verbosity;
use crate::severity::Severity;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for masklog.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Messages to relay. Lines are read from stdin when omitted or `-`.
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// Configuration file (.json, .yaml or .yml). Defaults to masklog.{json,yaml,yml} in the current directory.
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum level to emit, as a name or a number.
    #[arg(short, long)]
    pub level: Option<String>,

    /// Keys whose values are masked (comma-separated, repeatable).
    #[arg(short = 'k', long = "sensitive-key", value_delimiter = ',')]
    pub sensitive_keys: Vec<String>,

    /// Label shown in place of the logger name in the compact format.
    #[arg(short, long = "project-label")]
    pub project_label: Option<String>,

    /// Level given to every relayed message.
    #[arg(short, long = "emit-level", default_value = "INFO")]
    pub emit_level: Severity,

    /// Relay through the `log` facade bridge instead of the native macros.
    /// The facade has five levels, so SUCCESS, CRITICAL and raw numbers are
    /// relayed as the nearest of them (a warning says so).
    #[arg(long = "via-bridge")]
    pub via_bridge: bool,

    /// Print masklog's own setup diagnostics (config discovery, sink
    /// registration) to stderr. `RUST_LOG` directives apply as well.
    #[arg(short, long)]
    pub diagnostics: bool,

    /// When to colour output.
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Lower the minimum level (`-v` DEBUG, `-vv` TRACE) when `--level` is not given.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments, exiting with clap's usage output on error.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to a minimum level; no flag leaves the configured one.
pub fn get_level_from_verbose(verbose_count: u8) -> Option<Severity> {
    match verbose_count {
        verbosity::OFF => None,
        verbosity::DEBUG => Some(Severity::Debug),
        verbosity::TRACE.. => Some(Severity::Trace),
    }
}
