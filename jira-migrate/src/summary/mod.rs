//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::{IssueOutcome, IssueResult};
pub use run_summary::{FailedIssue, RunSummary};
