//! Run summary types.

use super::result::{IssueOutcome, IssueResult};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// An issue that was not (fully) migrated, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedIssue {
    /// Jira key.
    pub key: String,

    /// Issue title.
    pub title: String,

    /// Human-readable reason.
    pub reason: String,
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Jira project that was migrated.
    pub project: String,

    /// Number of issues in the project.
    pub issues_total: usize,

    /// Number of issues created on the destination.
    pub issues_migrated: usize,

    /// Number of issues skipped because they were already cached.
    pub issues_skipped: usize,

    /// Number of issues whose milestone could not be resolved.
    pub issues_unresolved: usize,

    /// Number of issues the destination rejected.
    pub issues_failed: usize,

    /// Number of comments posted.
    pub comments_posted: usize,

    /// Number of comments that could not be posted.
    pub comments_failed: usize,

    /// Issues that could not be migrated.
    pub failures: Vec<FailedIssue>,

    /// Migrated issues with comments that could not be posted.
    pub comment_failures: Vec<FailedIssue>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(project: impl Into<String>, issues_total: usize, dry_run: bool) -> Self {
        Self {
            project: project.into(),
            issues_total,
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &IssueResult) {
        let failure = |reason: String| FailedIssue {
            key: result.key.clone(),
            title: result.title.clone(),
            reason,
        };

        match &result.outcome {
            IssueOutcome::Skipped => self.issues_skipped += 1,
            IssueOutcome::Migrated {
                comments_posted,
                comment_errors,
                ..
            } => {
                self.issues_migrated += 1;
                self.comments_posted += comments_posted;
                self.comments_failed += comment_errors.len();
                if !comment_errors.is_empty() {
                    self.comment_failures
                        .push(failure(comment_errors.join("; ")));
                }
            }
            IssueOutcome::UnresolvedMilestone { milestone } => {
                self.issues_unresolved += 1;
                self.failures
                    .push(failure(format!("milestone '{milestone}' not found")));
            }
            IssueOutcome::Failed { error } => {
                self.issues_failed += 1;
                self.failures.push(failure(error.clone()));
            }
        }
    }

    /// Number of issues that could not be migrated.
    #[must_use]
    pub fn issues_not_migrated(&self) -> usize {
        self.issues_unresolved + self.issues_failed
    }

    /// Returns true if any issue could not be migrated.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.issues_not_migrated() > 0
    }

    /// Returns true if every issue was migrated or skipped.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }

    /// Writes the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] if the file can't be written.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
