//! In-memory model of a Jira export.

mod issue;
mod project;

pub use issue::Issue;
pub use project::{Export, Project};
