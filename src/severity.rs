//! Ordered log severities and their textual / numeric resolution.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Severity of a log record.
///
/// Comparison and equality only look at [`Severity::rank`], so a raw
/// `Severity::Level(20)` compares equal to `Severity::Info`.
#[derive(Debug, Clone, Copy)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Critical,
    /// A rank that does not correspond to one of the named tiers.
    Level(u32),
}

impl Severity {
    /// Named tiers from the most to the least verbose.
    pub const NAMED: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Numeric rank used for every comparison.
    pub fn rank(&self) -> u32 {
        match self {
            Severity::Trace => 5,
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Success => 25,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
            Severity::Level(rank) => *rank,
        }
    }

    /// Name shown between the brackets of a rendered line.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Severity::Trace => Cow::Borrowed("TRACE"),
            Severity::Debug => Cow::Borrowed("DEBUG"),
            Severity::Info => Cow::Borrowed("INFO"),
            Severity::Success => Cow::Borrowed("SUCCESS"),
            Severity::Warning => Cow::Borrowed("WARNING"),
            Severity::Error => Cow::Borrowed("ERROR"),
            Severity::Critical => Cow::Borrowed("CRITICAL"),
            Severity::Level(rank) => Cow::Owned(format!("Level {rank}")),
        }
    }

    /// Looks up a named tier, ignoring case. `WARN` and `FATAL` are accepted
    /// as aliases.
    pub fn from_name(name: &str) -> Option<Severity> {
        let severity = match name.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Severity::Trace,
            "DEBUG" => Severity::Debug,
            "INFO" => Severity::Info,
            "SUCCESS" => Severity::Success,
            "WARNING" | "WARN" => Severity::Warning,
            "ERROR" => Severity::Error,
            "CRITICAL" | "FATAL" => Severity::Critical,
            _ => return None,
        };
        Some(severity)
    }

    /// Whether this is the most verbose tier that selects the diagnostic format.
    pub fn is_debug(&self) -> bool {
        *self == Severity::Debug
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for Severity {}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a string is neither a level name nor a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}'", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for Severity {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(severity) = Severity::from_name(s) {
            return Ok(severity);
        }
        s.trim()
            .parse::<u32>()
            .map(Severity::Level)
            .map_err(|_| UnknownLevel(s.to_string()))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// A minimum level as it appears in configuration: a symbolic name or a raw
/// numeric rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Rank(u32),
    Name(String),
}

impl LevelSpec {
    /// Resolves to a severity. Unresolvable names degrade to rank 0 so a bad
    /// setting lets everything through instead of failing.
    pub fn resolve(&self) -> Severity {
        match self {
            LevelSpec::Rank(rank) => Severity::Level(*rank),
            LevelSpec::Name(name) => name.parse().unwrap_or(Severity::Level(0)),
        }
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::Name(crate::constants::defaults::MIN_LEVEL.to_string())
    }
}

impl From<Severity> for LevelSpec {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Level(rank) => LevelSpec::Rank(rank),
            named => LevelSpec::Name(named.name().into_owned()),
        }
    }
}

impl From<&str> for LevelSpec {
    fn from(value: &str) -> Self {
        LevelSpec::Name(value.to_string())
    }
}

impl From<u32> for LevelSpec {
    fn from(value: u32) -> Self {
        LevelSpec::Rank(value)
    }
}
