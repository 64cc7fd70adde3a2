//! Source issue information.

/// A single issue extracted from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    /// Issue title.
    pub title: String,

    /// Jira issue type (e.g., "Bug").
    pub kind: String,

    /// Unique Jira key (e.g., "PROJ-123").
    pub key: String,

    /// Body synthesized from the description and reporter metadata.
    pub body: String,

    /// Labels, de-duplicated in first-seen order.
    pub labels: Vec<String>,

    /// Comment bodies in export order.
    pub comments: Vec<String>,

    /// Jira fix version, cleared once a destination milestone is assigned.
    pub milestone_name: Option<String>,

    /// Destination milestone number.
    pub milestone: Option<u64>,
}

impl Issue {
    /// Appends a label unless it is empty or already present.
    pub fn push_label(&mut self, label: &str) {
        if label.is_empty() || self.labels.iter().any(|existing| existing == label) {
            return;
        }
        self.labels.push(label.to_string());
    }

    /// Assigns a resolved milestone, dropping the pending milestone name.
    pub fn assign_milestone(&mut self, number: u64) {
        self.milestone = Some(number);
        self.milestone_name = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_label_skips_duplicates_and_empty() {
        let mut issue = Issue::default();
        issue.push_label("Open");
        issue.push_label("");
        issue.push_label("Bug");
        issue.push_label("Open");

        assert_eq!(issue.labels, vec!["Open", "Bug"]);
    }

    #[test]
    fn assign_milestone_clears_name() {
        let mut issue = Issue {
            milestone_name: Some("1.0".to_string()),
            ..Default::default()
        };
        issue.assign_milestone(7);

        assert_eq!(issue.milestone, Some(7));
        assert_eq!(issue.milestone_name, None);
    }
}
