//! Constants used throughout masklog

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["masklog.json", "masklog.yaml", "masklog.yml"];

/// Values with this many characters or fewer are emitted unmasked.
pub const SHORT_VALUE_THRESHOLD: usize = 6;

/// Replacement inserted between the kept prefix and suffix of a masked value.
pub const MASK: &str = "*****";

/// Number of leading characters kept by the masker.
pub const MASK_PREFIX_LEN: usize = 3;

/// Timestamp layout shared by both line formats.
pub const TIMESTAMP_FORMAT: &str = "%m-%d %H:%M:%S";

/// Placeholder for call-site parts that could not be recovered.
pub const UNKNOWN_CALL_SITE: &str = "?";

/// Defaults applied when no configuration overrides them.
pub mod defaults {
    pub const MIN_LEVEL: &str = "INFO";
    pub const SENSITIVE_KEYS: &[&str] = &["Cookie"];
    pub const PROJECT_LABEL: &str = "app";
}

/// Environment variables read by the configuration loader
pub mod env {
    pub const LEVEL: &str = "MASKLOG_LEVEL";
    pub const SENSITIVE_KEYS: &str = "MASKLOG_SENSITIVE_KEYS";
    pub const PROJECT_LABEL: &str = "MASKLOG_PROJECT_LABEL";
    pub const COLOR: &str = "MASKLOG_COLOR";
    pub const BRIDGE_FILTER: &str = "MASKLOG_BRIDGE_FILTER";
}

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const DEBUG: u8 = 1;
    pub const TRACE: u8 = 2;
}
