//! Error types for wordsql configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// The `[builder]` section has no SQL template.
    #[error("config file {path} does not set builder.template")]
    MissingTemplate {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// A setting has a value outside its allowed range.
    #[error("invalid value for {key} in {path}: {message}")]
    InvalidValue {
        /// Path to the offending file.
        path: PathBuf,
        /// Dotted key of the setting.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}
