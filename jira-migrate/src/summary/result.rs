//! Per-issue processing results.

/// Terminal state of one issue within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Already present in the completion cache.
    Skipped,

    /// Created on the destination (or recorded, in dry-run mode).
    Migrated {
        /// Destination issue number; `None` in dry-run mode.
        number: Option<u64>,
        /// Comments posted successfully.
        comments_posted: usize,
        /// Errors for comments that could not be posted.
        comment_errors: Vec<String>,
    },

    /// The issue's fix version has no destination milestone.
    UnresolvedMilestone {
        /// Jira fix version name.
        milestone: String,
    },

    /// The destination rejected the issue.
    Failed {
        /// Error message.
        error: String,
    },
}

/// Result of processing a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueResult {
    /// Jira key.
    pub key: String,

    /// Issue title.
    pub title: String,

    /// What happened to the issue.
    pub outcome: IssueOutcome,
}
