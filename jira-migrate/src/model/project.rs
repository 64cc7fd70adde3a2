//! Project and export aggregates.

use super::Issue;
use std::collections::{BTreeMap, HashSet};

/// All issues of one Jira project plus aggregate counts.
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Jira project key (e.g., "PROJ").
    pub key: String,

    /// Fix version name -> number of issues targeting it.
    pub milestones: BTreeMap<String, usize>,

    /// Component name -> number of issues.
    pub components: BTreeMap<String, usize>,

    /// Label value (versions, priorities, explicit labels) -> occurrences.
    pub labels: BTreeMap<String, usize>,

    /// Issues in export order.
    pub issues: Vec<Issue>,

    /// Keys of issues added through [`Project::push_issue`].
    issue_keys: HashSet<String>,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Returns true if an issue with this key was already extracted.
    #[must_use]
    pub fn contains_issue(&self, key: &str) -> bool {
        self.issue_keys.contains(key)
    }

    /// Appends an issue unless one with the same key is already present.
    ///
    /// Returns false for a duplicate key; the first occurrence is kept.
    pub fn push_issue(&mut self, issue: Issue) -> bool {
        if !self.issue_keys.insert(issue.key.clone()) {
            return false;
        }
        self.issues.push(issue);
        true
    }
}

/// Parsed export, keyed by project.
#[derive(Debug, Clone, Default)]
pub struct Export {
    /// Projects found in the export, ordered by key.
    pub projects: BTreeMap<String, Project>,
}

impl Export {
    /// Returns the project entry, creating it if needed.
    pub fn project_mut(&mut self, key: &str) -> &mut Project {
        self.projects
            .entry(key.to_string())
            .or_insert_with(|| Project::new(key))
    }

    /// Removes and returns a project by key.
    pub fn take_project(&mut self, key: &str) -> Option<Project> {
        self.projects.remove(key)
    }

    /// Returns the keys of all projects in the export.
    #[must_use]
    pub fn project_keys(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    /// Total number of issues across projects.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.projects.values().map(|p| p.issues.len()).sum()
    }
}
