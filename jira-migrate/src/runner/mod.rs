//! Orchestrates the Jira to GitHub migration.

mod config;
mod error;

pub use config::{MigrationOptions, RunnerConfig};
pub use error::RunnerError;

use crate::aliases::AliasTable;
use crate::cache::CompletionCache;
use crate::extract::load_export;
use crate::milestones::{resolve_milestones, MilestoneMap};
use crate::model::{Export, Issue, Project};
use crate::summary::{IssueOutcome, IssueResult, RunSummary};
use crate::tracker::{build_client, GitHubTracker, IssueTracker, NewIssue};
use indicatif::ProgressBar;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Takes the configured project out of an export.
///
/// # Errors
///
/// Returns [`RunnerError::UnknownProject`] if the export has no such project.
pub fn select_project(mut export: Export, key: &str) -> Result<Project, RunnerError> {
    export
        .take_project(key)
        .ok_or_else(|| RunnerError::UnknownProject {
            project: key.to_string(),
            available: export.project_keys().join(", "),
        })
}

/// Orchestrates a full migration run against GitHub.
pub struct Runner {
    config: RunnerConfig,
    tracker: GitHubTracker,
    progress: ProgressBar,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = build_client(config.user(), config.password(), config.api_url())?;
        let tracker = GitHubTracker::new(octocrab, config.owner(), config.repo());
        Ok(Self {
            config,
            tracker,
            progress: ProgressBar::hidden(),
        })
    }

    /// Reports per-issue progress on the given bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Executes the full flow: extract, load aliases and cache, migrate.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let options = self.config.options();
        info!(
            project = %self.config.project(),
            repo = %self.tracker.full_name(),
            dry_run = options.dry_run,
            "Starting migration"
        );

        let export = load_export(self.config.xml_path())?;
        let mut project = select_project(export, self.config.project())?;

        let aliases = match self.config.aliases_path() {
            Some(path) => AliasTable::load(path)?,
            None => AliasTable::default(),
        };
        let mut cache = CompletionCache::load(self.config.cache_path())?;

        Migrator::new(&self.tracker, options)
            .with_aliases(aliases)
            .with_progress(self.progress.clone())
            .run(&mut project, &mut cache)
            .await
    }
}

/// Replays a project's issues against an [`IssueTracker`], one at a time.
pub struct Migrator<'a, T> {
    tracker: &'a T,
    options: MigrationOptions,
    aliases: AliasTable,
    progress: ProgressBar,
}

impl<'a, T: IssueTracker> Migrator<'a, T> {
    /// Creates a migrator with no aliases and a hidden progress bar.
    pub fn new(tracker: &'a T, options: MigrationOptions) -> Self {
        Self {
            tracker,
            options,
            aliases: AliasTable::default(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Sets the label alias table.
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Reports per-issue progress on the given bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves milestones, then migrates every issue of the project.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if milestones can't be listed or the cache
    /// can't be written. Per-issue failures are reported in the summary.
    pub async fn run(
        &self,
        project: &mut Project,
        cache: &mut CompletionCache,
    ) -> Result<RunSummary, RunnerError> {
        let create_missing = self.options.create_milestones && !self.options.dry_run;
        let milestones = resolve_milestones(self.tracker, project, create_missing).await?;
        self.migrate(project, &milestones, cache).await
    }

    /// Migrates every issue in export order using resolved milestones.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Cache`] if recording a migrated issue fails.
    pub async fn migrate(
        &self,
        project: &mut Project,
        milestones: &MilestoneMap,
        cache: &mut CompletionCache,
    ) -> Result<RunSummary, RunnerError> {
        let total = project.issues.len();
        let mut summary = RunSummary::new(&project.key, total, self.options.dry_run);
        info!(project = %project.key, count = total, "Creating each issue");

        self.progress.set_length(total as u64);
        self.progress.set_position(0);

        for issue in &mut project.issues {
            let outcome = self.process_issue(issue, milestones, cache).await?;
            summary.record_result(&IssueResult {
                key: issue.key.clone(),
                title: issue.title.clone(),
                outcome,
            });
            self.progress.inc(1);
        }

        self.progress.set_position(total as u64);
        self.progress.finish();

        info!(
            migrated = summary.issues_migrated,
            skipped = summary.issues_skipped,
            not_migrated = summary.issues_not_migrated(),
            "Migration finished"
        );
        Ok(summary)
    }

    async fn process_issue(
        &self,
        issue: &mut Issue,
        milestones: &MilestoneMap,
        cache: &mut CompletionCache,
    ) -> Result<IssueOutcome, RunnerError> {
        if cache.contains(&issue.key) {
            debug!(key = %issue.key, "Already migrated, skipping");
            return Ok(IssueOutcome::Skipped);
        }

        if let Some(name) = issue.milestone_name.clone() {
            match milestones.number(&name) {
                Some(number) => issue.assign_milestone(number),
                None => {
                    warn!(key = %issue.key, milestone = %name, "Milestone unresolved, cannot migrate");
                    return Ok(IssueOutcome::UnresolvedMilestone { milestone: name });
                }
            }
        }

        issue.labels = self.aliases.apply(&issue.labels, self.options.alias_mode);
        let comments = std::mem::take(&mut issue.comments);

        if self.options.dry_run {
            info!(key = %issue.key, "Dry run, recording issue without creating it");
            cache.record(&issue.key)?;
            return Ok(IssueOutcome::Migrated {
                number: None,
                comments_posted: 0,
                comment_errors: Vec::new(),
            });
        }

        let span = info_span!("create_issue", key = %issue.key);
        self.submit_issue(issue, &comments, cache)
            .instrument(span)
            .await
    }

    /// Creates the issue, records it, then posts its comments in order.
    async fn submit_issue(
        &self,
        issue: &Issue,
        comments: &[String],
        cache: &mut CompletionCache,
    ) -> Result<IssueOutcome, RunnerError> {
        let created = match self.tracker.create_issue(&NewIssue::from(issue)).await {
            Ok(created) => created,
            Err(e) => {
                error!(error = %e, "Failed to create issue");
                return Ok(IssueOutcome::Failed {
                    error: e.to_string(),
                });
            }
        };
        info!(issue_number = created.number, url = %created.url, "Issue created");

        cache.record(&issue.key)?;

        let mut comments_posted = 0;
        let mut comment_errors = Vec::new();
        for (index, comment) in comments.iter().enumerate() {
            match self.tracker.create_comment(created.number, comment).await {
                Ok(()) => comments_posted += 1,
                Err(e) => {
                    warn!(
                        issue_number = created.number,
                        comment = index + 1,
                        error = %e,
                        "Failed to post comment"
                    );
                    comment_errors.push(format!("comment {}: {e}", index + 1));
                }
            }
        }

        Ok(IssueOutcome::Migrated {
            number: Some(created.number),
            comments_posted,
            comment_errors,
        })
    }
}
