//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The export could not be read or parsed.
    #[error(transparent)]
    Extract(#[from] crate::extract::ExtractError),

    /// The alias file could not be loaded.
    #[error(transparent)]
    Alias(#[from] crate::aliases::AliasError),

    /// The completion cache could not be read or written.
    #[error(transparent)]
    Cache(#[from] crate::cache::CacheError),

    /// A run-level tracker call failed.
    #[error(transparent)]
    Tracker(#[from] crate::tracker::TrackerError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// The requested project is not in the export.
    #[error("Project '{project}' not found in export (available: {available})")]
    UnknownProject { project: String, available: String },
}
