#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aliases;
pub mod cache;
pub mod config;
pub mod extract;
pub mod milestones;
pub mod model;
pub mod report;
pub mod runner;
pub mod summary;
pub mod tracker;

pub use aliases::{AliasError, AliasMode, AliasTable};
pub use cache::{CacheError, CompletionCache, DEFAULT_CACHE_FILE};
pub use config::{parse_api_url, require, ConfigError, Settings};
pub use extract::{decode_html_entities, load_export, parse_export, ExtractError};
pub use milestones::{resolve_milestones, MilestoneMap};
pub use model::{Export, Issue, Project};
pub use report::render_project;
pub use runner::{select_project, MigrationOptions, Migrator, Runner, RunnerConfig, RunnerError};
pub use summary::{FailedIssue, IssueOutcome, IssueResult, RunSummary};
pub use tracker::{
    build_client, CreatedIssue, DestinationMilestone, GitHubTracker, IssueTracker, NewIssue,
    TrackerError,
};
