//! Alias table error types.

use thiserror::Error;

/// Errors that can occur while loading an alias table.
#[derive(Debug, Error)]
pub enum AliasError {
    /// Failed to open the alias file.
    #[error("Failed to read alias file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The alias file isn't valid CSV.
    #[error("Failed to parse alias file '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}
