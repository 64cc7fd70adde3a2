//! Extraction error types.

use thiserror::Error;

/// Errors that abort extraction of the whole export.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to read the export file.
    #[error("Failed to read export '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML export: {0}")]
    XmlError(#[from] roxmltree::Error),

    /// An item carries no issue key, so it could never be tracked.
    #[error("Item #{index} has no issue key")]
    MissingKey { index: usize },
}
