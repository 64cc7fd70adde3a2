//! In-memory tracker for unit tests.

use super::{CreatedIssue, DestinationMilestone, IssueTracker, NewIssue, TrackerError};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct FakeTracker {
    pub milestones: Mutex<Vec<DestinationMilestone>>,
    pub issues: Mutex<Vec<NewIssue>>,
    pub comments: Mutex<Vec<(u64, String)>>,
    pub rejected_titles: Vec<String>,
    pub fail_comments: bool,
    pub fail_milestone_creation: bool,
}

impl FakeTracker {
    pub fn with_milestones(titles: &[&str]) -> Self {
        let milestones = titles
            .iter()
            .enumerate()
            .map(|(i, title)| DestinationMilestone {
                number: i as u64 + 1,
                title: title.to_string(),
            })
            .collect();
        Self {
            milestones: Mutex::new(milestones),
            ..Default::default()
        }
    }

    pub fn created_issues(&self) -> Vec<NewIssue> {
        self.issues.lock().unwrap().clone()
    }

    pub fn created_comments(&self) -> Vec<(u64, String)> {
        self.comments.lock().unwrap().clone()
    }

    fn rejected(message: &str) -> TrackerError {
        TrackerError::Rejected {
            status: 422,
            message: message.to_string(),
        }
    }
}

impl IssueTracker for FakeTracker {
    async fn list_milestones(&self) -> Result<Vec<DestinationMilestone>, TrackerError> {
        Ok(self.milestones.lock().unwrap().clone())
    }

    async fn create_milestone(&self, title: &str) -> Result<DestinationMilestone, TrackerError> {
        if self.fail_milestone_creation {
            return Err(Self::rejected("milestone creation disabled"));
        }
        let mut milestones = self.milestones.lock().unwrap();
        let milestone = DestinationMilestone {
            number: milestones.len() as u64 + 1,
            title: title.to_string(),
        };
        milestones.push(milestone.clone());
        Ok(milestone)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        if self.rejected_titles.contains(&issue.title) {
            return Err(Self::rejected("Validation Failed"));
        }
        let mut issues = self.issues.lock().unwrap();
        issues.push(issue.clone());
        let number = issues.len() as u64;
        Ok(CreatedIssue {
            number,
            url: format!("https://github.com/acme/widgets/issues/{number}"),
        })
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<(), TrackerError> {
        if self.fail_comments {
            return Err(Self::rejected("comments locked"));
        }
        self.comments
            .lock()
            .unwrap()
            .push((issue_number, body.to_string()));
        Ok(())
    }
}
