//! Configuration loading from files and the environment

use crate::config::types::{ColorMode, SinkConfig};
use crate::constants::{defaults, env, CONFIG_FILENAMES};
use crate::error::{Error, Result};
use crate::severity::LevelSpec;
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The configuration surface as it is written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub min_level: LevelSpec,
    #[serde(default = "get_default_sensitive_keys")]
    pub sensitive_keys: IndexSet<String>,
    #[serde(default = "get_default_project_label")]
    pub project_label: String,
    #[serde(default)]
    pub color: ColorMode,
    /// `env_logger`-style directives applied to bridged records.
    #[serde(default)]
    pub bridge_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: LevelSpec::default(),
            sensitive_keys: get_default_sensitive_keys(),
            project_label: get_default_project_label(),
            color: ColorMode::default(),
            bridge_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Loads the first configuration file found in `config_dir`.
    pub fn discover<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = config_dir.join(config_file_name);
            if config_file_path.exists() {
                return Self::load(config_file_path);
            }
        }

        Err(Error::ConfigNotFound {
            config_dir: config_dir.display().to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    /// Loads a configuration file, picking the parser from its extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        let config = match extension {
            "json" => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            "yaml" | "yml" => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(Error::UnsupportedConfigFormat { path: path.display().to_string() })
            }
        };
        debug!("Loaded logging configuration from {}", path.display());
        Ok(config)
    }

    /// Applies `MASKLOG_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from any variable lookup. An empty
    /// `MASKLOG_SENSITIVE_KEYS` disables redaction; an unparsable colour
    /// setting is ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(env::LEVEL) {
            self.min_level = match level.trim().parse::<u32>() {
                Ok(rank) => LevelSpec::Rank(rank),
                Err(_) => LevelSpec::Name(level),
            };
        }
        if let Some(keys) = lookup(env::SENSITIVE_KEYS) {
            self.sensitive_keys = split_keys(&keys);
        }
        if let Some(label) = lookup(env::PROJECT_LABEL) {
            self.project_label = label;
        }
        if let Some(color) = lookup(env::COLOR) {
            match color.parse() {
                Ok(color) => self.color = color,
                Err(_) => debug!("Ignoring unrecognised {} value '{color}'", env::COLOR),
            }
        }
        if let Some(filter) = lookup(env::BRIDGE_FILTER) {
            self.bridge_filter = (!filter.trim().is_empty()).then_some(filter);
        }
        self
    }

    /// Freezes the surface into the configuration a sink is built from.
    pub fn into_sink_config(self) -> SinkConfig {
        SinkConfig::new(self.min_level)
            .with_sensitive_keys(self.sensitive_keys)
            .with_project_label(self.project_label)
            .with_colorize(self.color.resolve())
    }
}

/// Splits a comma separated key list, dropping blanks.
pub fn split_keys(keys: &str) -> IndexSet<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_default_sensitive_keys() -> IndexSet<String> {
    defaults::SENSITIVE_KEYS.iter().map(|key| key.to_string()).collect()
}

fn get_default_project_label() -> String {
    defaults::PROJECT_LABEL.to_string()
}
