//! Destination issue tracker.
//!
//! [`IssueTracker`] is the seam between the migration driver and the remote
//! API. [`GitHubTracker`] implements it on top of octocrab.

mod error;
#[cfg(test)]
pub(crate) mod fake;
mod github;

pub use error::TrackerError;
pub use github::{build_client, GitHubTracker};

use crate::model::Issue;
use serde::Deserialize;
use std::future::Future;

/// A milestone that exists on the destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DestinationMilestone {
    /// Milestone number used when assigning issues.
    pub number: u64,

    /// Milestone title.
    pub title: String,
}

/// Issue creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,

    /// Issue body.
    pub body: String,

    /// Label names.
    pub labels: Vec<String>,

    /// Milestone number, if any.
    pub milestone: Option<u64>,
}

impl From<&Issue> for NewIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            milestone: issue.milestone,
        }
    }
}

/// An issue created on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Destination issue number.
    pub number: u64,

    /// Destination issue URL.
    pub url: String,
}

/// Operations the migration needs from the destination tracker.
pub trait IssueTracker {
    /// Lists every milestone, open or closed.
    fn list_milestones(
        &self,
    ) -> impl Future<Output = Result<Vec<DestinationMilestone>, TrackerError>> + Send;

    /// Creates a milestone with the given title.
    fn create_milestone(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<DestinationMilestone, TrackerError>> + Send;

    /// Creates an issue.
    fn create_issue(
        &self,
        issue: &NewIssue,
    ) -> impl Future<Output = Result<CreatedIssue, TrackerError>> + Send;

    /// Adds a comment to an issue.
    fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> impl Future<Output = Result<(), TrackerError>> + Send;
}
