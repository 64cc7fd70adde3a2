//! GitHub implementation of [`IssueTracker`].

use super::{CreatedIssue, DestinationMilestone, IssueTracker, NewIssue, TrackerError};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Milestones requested per page.
const PAGE_SIZE: u8 = 100;

#[derive(Serialize)]
struct MilestoneQuery {
    state: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct NewMilestone<'a> {
    title: &'a str,
}

/// Builds an octocrab client using HTTP basic credentials.
///
/// # Arguments
///
/// * `user` - GitHub user name
/// * `password` - Password or personal access token
/// * `api_url` - Optional API base URL (GitHub Enterprise)
///
/// # Errors
///
/// Returns [`octocrab::Error`] if the client can't be configured.
pub fn build_client(
    user: &str,
    password: &str,
    api_url: Option<&Url>,
) -> Result<Octocrab, octocrab::Error> {
    let mut builder = Octocrab::builder().basic_auth(user.to_string(), password.to_string());
    if let Some(url) = api_url {
        builder = builder.base_uri(url.as_str())?;
    }
    builder.build()
}

/// Issue tracker backed by a single GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubTracker {
    /// Creates a tracker for `owner/repo`.
    pub fn new(octocrab: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Returns the repository in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn milestones_route(&self) -> String {
        format!("/repos/{}/{}/milestones", self.owner, self.repo)
    }
}

impl IssueTracker for GitHubTracker {
    async fn list_milestones(&self) -> Result<Vec<DestinationMilestone>, TrackerError> {
        let route = self.milestones_route();
        let mut milestones = Vec::new();
        let mut page = 1;

        loop {
            let query = MilestoneQuery {
                state: "all",
                per_page: PAGE_SIZE,
                page,
            };
            let batch: Vec<DestinationMilestone> = self.octocrab.get(&route, Some(&query)).await?;
            let fetched = batch.len();
            milestones.extend(batch);

            if fetched < usize::from(PAGE_SIZE) {
                break;
            }
            page += 1;
        }

        debug!(repo = %self.full_name(), count = milestones.len(), "Listed milestones");
        Ok(milestones)
    }

    async fn create_milestone(&self, title: &str) -> Result<DestinationMilestone, TrackerError> {
        let milestone: DestinationMilestone = self
            .octocrab
            .post(self.milestones_route(), Some(&NewMilestone { title }))
            .await?;
        Ok(milestone)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        let created = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .milestone(issue.milestone)
            .send()
            .await?;

        Ok(CreatedIssue {
            number: created.number,
            url: created.html_url.to_string(),
        })
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<(), TrackerError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(issue_number, body)
            .await?;
        Ok(())
    }
}
