//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse settings file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in settings.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// A required value was given neither on the command line nor in settings.
    #[error("Missing required value: {name}")]
    MissingValue { name: &'static str },

    /// Failed to prompt for a value on the terminal.
    #[error("Failed to read {name} from the terminal: {source}")]
    PromptError {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The API base URL is unusable.
    #[error("Invalid API URL '{url}': {message}")]
    InvalidApiUrl { url: String, message: String },
}
