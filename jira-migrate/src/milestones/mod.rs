//! Resolution of Jira fix versions to GitHub milestones.

use crate::model::Project;
use crate::tracker::{IssueTracker, TrackerError};
use std::collections::BTreeMap;
use tracing::{info, info_span, warn, Instrument};

/// Fix version name -> destination milestone number (`None` if unresolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneMap {
    entries: BTreeMap<String, Option<u64>>,
}

impl MilestoneMap {
    /// Records the resolution of a milestone name.
    pub fn insert(&mut self, name: impl Into<String>, number: Option<u64>) {
        self.entries.insert(name.into(), number);
    }

    /// Returns the destination number for a milestone name, if resolved.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<u64> {
        self.entries.get(name).copied().flatten()
    }

    /// Names that could not be resolved.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, number)| number.is_none())
            .map(|(name, _)| name.as_str())
    }

    /// Number of known milestone names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the project uses no milestones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves every milestone name used by the project.
///
/// Existing destination milestones are matched by exact title. Missing ones
/// are created when `create_missing` is set and left unresolved otherwise.
/// A failed creation leaves that milestone unresolved.
///
/// # Errors
///
/// Returns [`TrackerError`] if the destination milestones can't be listed.
pub async fn resolve_milestones<T: IssueTracker>(
    tracker: &T,
    project: &Project,
    create_missing: bool,
) -> Result<MilestoneMap, TrackerError> {
    let mut map = MilestoneMap::default();
    if project.milestones.is_empty() {
        return Ok(map);
    }

    let span = info_span!("resolve_milestones", project = %project.key);
    async {
        info!(count = project.milestones.len(), "Resolving milestones");
        let existing = tracker.list_milestones().await?;

        for name in project.milestones.keys() {
            if let Some(found) = existing.iter().find(|m| &m.title == name) {
                map.insert(name.as_str(), Some(found.number));
                continue;
            }

            if !create_missing {
                warn!(milestone = %name, "Milestone not found on destination");
                map.insert(name.as_str(), None);
                continue;
            }

            match tracker.create_milestone(name).await {
                Ok(created) => {
                    info!(milestone = %name, number = created.number, "Created milestone");
                    map.insert(name.as_str(), Some(created.number));
                }
                Err(e) => {
                    warn!(milestone = %name, error = %e, "Failed to create milestone");
                    map.insert(name.as_str(), None);
                }
            }
        }

        Ok::<_, TrackerError>(map)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::fake::FakeTracker;

    fn project_with(names: &[&str]) -> Project {
        let mut project = Project::new("ABC");
        for name in names {
            project.milestones.insert(name.to_string(), 1);
        }
        project
    }

    #[tokio::test]
    async fn records_existing_milestone_numbers() {
        let tracker = FakeTracker::with_milestones(&["0.9", "1.0"]);
        let map = resolve_milestones(&tracker, &project_with(&["1.0"]), false)
            .await
            .unwrap();

        assert_eq!(map.number("1.0"), Some(2));
    }

    #[tokio::test]
    async fn leaves_missing_milestones_unresolved() {
        let tracker = FakeTracker::with_milestones(&["1.0"]);
        let map = resolve_milestones(&tracker, &project_with(&["1.0", "2.0"]), false)
            .await
            .unwrap();

        assert_eq!(map.number("2.0"), None);
        assert_eq!(map.unresolved().collect::<Vec<_>>(), vec!["2.0"]);
    }

    #[tokio::test]
    async fn creates_missing_milestones_when_enabled() {
        let tracker = FakeTracker::with_milestones(&["1.0"]);
        let map = resolve_milestones(&tracker, &project_with(&["2.0"]), true)
            .await
            .unwrap();

        assert_eq!(map.number("2.0"), Some(2));
        assert_eq!(tracker.milestones.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_creation_leaves_milestone_unresolved() {
        let tracker = FakeTracker {
            fail_milestone_creation: true,
            ..Default::default()
        };
        let map = resolve_milestones(&tracker, &project_with(&["2.0"]), true)
            .await
            .unwrap();

        assert_eq!(map.number("2.0"), None);
        assert_eq!(map.len(), 1);
    }

    #[tokio::test]
    async fn project_without_milestones_skips_listing() {
        let tracker = FakeTracker::default();
        let map = resolve_milestones(&tracker, &Project::new("ABC"), true)
            .await
            .unwrap();

        assert!(map.is_empty());
    }
}
