//! Immutable sink configuration and the small enums it is built from

use crate::constants::defaults;
use crate::severity::{LevelSpec, Severity};
use clap::ValueEnum;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// When rendered lines carry ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ColorMode {
    /// Style only when stdout is a terminal.
    #[default]
    Auto,
    /// Always style.
    Always,
    /// Never style.
    Never,
}

impl ColorMode {
    pub fn resolve(&self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <ColorMode as ValueEnum>::from_str(s, true)
    }
}

/// Configuration shared by the filter and the format selector of one sink.
///
/// Built once and never changed afterwards; a different configuration means a
/// new sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    min_level: Severity,
    sensitive_keys: IndexSet<String>,
    project_label: String,
    verbose: bool,
    colorize: bool,
}

impl SinkConfig {
    /// A configuration with the given minimum level and no redaction.
    pub fn new(min_level: impl Into<LevelSpec>) -> Self {
        let min_level = min_level.into().resolve();
        Self {
            min_level,
            sensitive_keys: IndexSet::new(),
            project_label: defaults::PROJECT_LABEL.to_string(),
            verbose: min_level.is_debug(),
            colorize: false,
        }
    }

    /// Keys whose values get masked, applied in the given order. Duplicates
    /// keep their first position.
    pub fn with_sensitive_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project_label(mut self, label: impl Into<String>) -> Self {
        self.project_label = label.into();
        self
    }

    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    pub fn sensitive_keys(&self) -> &IndexSet<String> {
        &self.sensitive_keys
    }

    pub fn project_label(&self) -> &str {
        &self.project_label
    }

    /// Full exception diagnosis; on exactly when the minimum level is DEBUG.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn colorize(&self) -> bool {
        self.colorize
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig::new(LevelSpec::default()).with_sensitive_keys(defaults::SENSITIVE_KEYS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_follows_debug_minimum() {
        assert!(SinkConfig::new("DEBUG").verbose());
        assert!(SinkConfig::new(10u32).verbose());
        assert!(!SinkConfig::new("INFO").verbose());
        assert!(!SinkConfig::new("TRACE").verbose());
    }

    #[test]
    fn default_matches_template_defaults() {
        let config = SinkConfig::default();
        assert_eq!(config.min_level(), Severity::Info);
        assert_eq!(config.sensitive_keys().iter().collect::<Vec<_>>(), vec!["Cookie"]);
        assert_eq!(config.project_label(), "app");
        assert!(!config.colorize());
    }

    #[test]
    fn sensitive_keys_keep_insertion_order_without_duplicates() {
        let config = SinkConfig::new("INFO").with_sensitive_keys(["token", "Cookie", "token", "apikey"]);
        let keys: Vec<_> = config.sensitive_keys().iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["token", "Cookie", "apikey"]);
    }

    #[test]
    fn color_mode_parses_and_displays() {
        assert_eq!("ALWAYS".parse::<ColorMode>(), Ok(ColorMode::Always));
        assert_eq!(ColorMode::Never.to_string(), "never");
        assert!(ColorMode::Always.resolve());
        assert!(!ColorMode::Never.resolve());
    }
}
