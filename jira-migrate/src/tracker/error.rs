//! Issue tracker error types.

use thiserror::Error;

/// Errors returned by issue tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The API answered with an error status.
    #[error("GitHub rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport, serialization or other client failure.
    #[error("GitHub API error: {0}")]
    GitHubError(#[source] octocrab::Error),
}

impl From<octocrab::Error> for TrackerError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Rejected {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::GitHubError(other),
        }
    }
}
