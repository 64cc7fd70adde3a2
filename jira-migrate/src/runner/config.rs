//! Runner configuration.

use crate::aliases::AliasMode;
use crate::cache::DEFAULT_CACHE_FILE;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Switches that change how issues are migrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Record issues as migrated without calling the issue API.
    pub dry_run: bool,
    /// Create milestones missing on the destination.
    pub create_milestones: bool,
    /// How aliased labels relate to their originals.
    pub alias_mode: AliasMode,
}

/// Configuration for a full migration run.
#[derive(Clone)]
pub struct RunnerConfig {
    /// Path to the Jira XML export.
    xml_path: PathBuf,
    /// Jira project key to migrate.
    project: String,
    /// GitHub repository owner (organisation or user).
    owner: String,
    /// GitHub repository name.
    repo: String,
    /// GitHub user for basic authentication.
    user: String,
    /// GitHub password or token.
    password: String,
    /// Optional label alias file.
    aliases_path: Option<PathBuf>,
    /// Completion cache file.
    cache_path: PathBuf,
    /// Optional API base URL.
    api_url: Option<Url>,
    /// Migration switches.
    options: MigrationOptions,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        xml_path: PathBuf,
        project: String,
        owner: String,
        repo: String,
        user: String,
        password: String,
    ) -> Self {
        Self {
            xml_path,
            project,
            owner,
            repo,
            user,
            password,
            aliases_path: None,
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            api_url: None,
            options: MigrationOptions::default(),
        }
    }

    /// Sets the label alias file.
    pub fn with_aliases_path(mut self, aliases_path: PathBuf) -> Self {
        self.aliases_path = Some(aliases_path);
        self
    }

    /// Sets a custom completion cache path.
    pub fn with_cache_path(mut self, cache_path: PathBuf) -> Self {
        self.cache_path = cache_path;
        self
    }

    /// Sets a custom GitHub API base URL.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = Some(api_url);
        self
    }

    /// Sets the migration switches.
    pub fn with_options(mut self, options: MigrationOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the export path.
    pub fn xml_path(&self) -> &Path {
        &self.xml_path
    }

    /// Returns the Jira project key.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the GitHub user.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the GitHub password or token.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Returns the alias file path, if any.
    pub fn aliases_path(&self) -> Option<&Path> {
        self.aliases_path.as_deref()
    }

    /// Returns the completion cache path.
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns the API base URL override, if any.
    pub fn api_url(&self) -> Option<&Url> {
        self.api_url.as_ref()
    }

    /// Returns the migration switches.
    pub fn options(&self) -> MigrationOptions {
        self.options
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("xml_path", &self.xml_path)
            .field("project", &self.project)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("aliases_path", &self.aliases_path)
            .field("cache_path", &self.cache_path)
            .field("api_url", &self.api_url)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunnerConfig {
        RunnerConfig::new(
            PathBuf::from("export.xml"),
            "ABC".to_string(),
            "acme".to_string(),
            "widgets".to_string(),
            "bot".to_string(),
            "secret".to_string(),
        )
    }

    #[test]
    fn defaults_to_local_cache_file() {
        let config = config();

        assert_eq!(config.cache_path(), Path::new("cache.txt"));
        assert!(config.aliases_path().is_none());
        assert!(!config.options().dry_run);
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", config());

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = config()
            .with_cache_path(PathBuf::from("/tmp/c.json"))
            .with_options(MigrationOptions {
                dry_run: true,
                ..Default::default()
            });

        assert_eq!(config.cache_path(), Path::new("/tmp/c.json"));
        assert!(config.options().dry_run);
    }
}
