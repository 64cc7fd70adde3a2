//! Persistent record of migrated issues.
//!
//! The cache is a JSON list of Jira keys. It's rewritten in full after every
//! successful migration, so an interrupted run resumes where it stopped.

mod error;

pub use error::CacheError;

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default cache file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "cache.txt";

/// Keys of issues already created on the destination.
#[derive(Debug, Clone)]
pub struct CompletionCache {
    path: PathBuf,
    keys: Vec<String>,
    index: HashSet<String>,
}

impl CompletionCache {
    /// Loads the cache from `path`.
    ///
    /// A missing or empty file yields an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file exists but can't be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cache file, starting empty");
                String::new()
            }
            Err(e) => {
                return Err(CacheError::IoError {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let keys: Vec<String> = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents).map_err(|e| CacheError::ParseError {
                path: path.display().to_string(),
                source: e,
            })?
        };

        info!(path = %path.display(), count = keys.len(), "Loaded completion cache");
        let index = keys.iter().cloned().collect();
        Ok(Self { path, keys, index })
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the issue was already migrated.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Returns the cached keys in the order they were recorded.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing has been migrated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Records a migrated issue and persists the cache immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the cache can't be written.
    pub fn record(&mut self, key: &str) -> Result<(), CacheError> {
        if self.index.insert(key.to_string()) {
            self.keys.push(key.to_string());
        }
        self.save()
    }

    /// Writes the full key list, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if serialization or any file operation fails.
    pub fn save(&self) -> Result<(), CacheError> {
        let io_error = |source: std::io::Error| CacheError::IoError {
            path: self.path.display().to_string(),
            source,
        };

        let json = serde_json::to_vec(&self.keys).map_err(|e| CacheError::SerializeError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(&json).map_err(io_error)?;
        file.persist(&self.path).map_err(|e| io_error(e.error))?;

        debug!(path = %self.path.display(), count = self.keys.len(), "Saved completion cache");
        Ok(())
    }
}
