//! Configuration management for masklog
//!
//! This module contains the configuration system components:
//! - `types`: the immutable `SinkConfig` and the enums it is built from
//! - `loader`: configuration file discovery, parsing and environment overrides

pub mod loader;
pub mod types;


// Re-export commonly used types for convenience
pub use loader::{split_keys, LoggingConfig};
pub use types::{ColorMode, SinkConfig};
