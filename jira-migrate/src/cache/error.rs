//! Completion cache error types.

use thiserror::Error;

/// Errors that can occur while loading or saving the completion cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read or write the cache file.
    #[error("Cache file '{path}' I/O error: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The cache file doesn't contain a list of issue keys.
    #[error("Failed to parse cache file '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the key list.
    #[error("Failed to serialize cache for '{path}': {source}")]
    SerializeError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
