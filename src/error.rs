use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON config file. Original error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML config file. Original error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("No configuration file found in '{config_dir}'. Tried: {config_files}.")]
    ConfigNotFound { config_dir: String, config_files: String },

    #[error("Unsupported configuration file '{path}'. Expected a .json, .yaml or .yml file.")]
    UnsupportedConfigFormat { path: String },

    /// A sensitive key produced a pattern the regex engine refused.
    #[error("Failed to compile redaction pattern. Original error: {0}")]
    PatternError(#[from] regex::Error),

    /// Another `log` implementation was installed before the bridge.
    #[error("Failed to install the logging bridge. Original error: {0}")]
    BridgeInstallError(#[from] log::SetLoggerError),
}

/// Convenience type alias for Results with masklog's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
