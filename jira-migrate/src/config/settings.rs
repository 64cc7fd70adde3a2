//! Settings file deserialization.

use super::{parse_api_url, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Defaults loaded from a TOML settings file.
///
/// Every key is optional. Relative paths are resolved against the working
/// directory, like their command-line counterparts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Jira XML export.
    pub xml_path: Option<PathBuf>,

    /// Jira project key to migrate.
    pub jira_project: Option<String>,

    /// GitHub organisation owning the repository.
    pub github_orga: Option<String>,

    /// GitHub repository name.
    pub github_repo: Option<String>,

    /// GitHub user used for authentication.
    pub github_user: Option<String>,

    /// CSV file with label aliases.
    pub aliases_path: Option<PathBuf>,

    /// Completion cache file.
    pub cache_path: Option<PathBuf>,

    /// GitHub API base URL (GitHub Enterprise).
    pub api_url: Option<String>,

    /// Create milestones missing on GitHub.
    #[serde(default)]
    pub create_milestones: bool,

    /// Keep the original label next to its alias.
    #[serde(default)]
    pub keep_aliased_labels: bool,
}

impl Settings {
    /// Loads and validates a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let path_str = path.display().to_string();

        let text_values = [
            ("jira-project", &self.jira_project),
            ("github-orga", &self.github_orga),
            ("github-repo", &self.github_repo),
            ("github-user", &self.github_user),
        ];
        for (name, value) in text_values {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::ValidationError {
                    path: path_str,
                    message: format!("{name} must not be empty"),
                });
            }
        }

        if let Some(api_url) = &self.api_url {
            parse_api_url(api_url).map_err(|e| ConfigError::ValidationError {
                path: path_str,
                message: e.to_string(),
            })?;
        }

        Ok(())
    }
}
