//! CLI for the Jira to GitHub migration.
//!
//! Reads a Jira XML export and replays its issues into a GitHub repository,
//! or prints label/milestone histograms with `--prettify`.

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use jira_migrate::{
    load_export, parse_api_url, render_project, require, select_project, AliasMode, ConfigError,
    MigrationOptions, RunSummary, Runner, RunnerConfig, RunnerError, Settings,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

/// Jira to GitHub - Migrate issues from a Jira XML export to a GitHub repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML settings file providing defaults for the options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Jira XML export path.
    #[arg(long)]
    xml_path: Option<PathBuf>,

    /// Jira project to migrate.
    #[arg(long)]
    jira_project: Option<String>,

    /// GitHub organisation (defaults to the user).
    #[arg(long)]
    github_orga: Option<String>,

    /// GitHub repository.
    #[arg(long)]
    github_repo: Option<String>,

    /// GitHub user.
    #[arg(long)]
    github_user: Option<String>,

    /// GitHub password or token (prompted when omitted).
    #[arg(long, env = "GITHUB_PASSWORD", hide_env_values = true)]
    github_password: Option<String>,

    /// Label aliases CSV path.
    #[arg(long)]
    aliases_path: Option<PathBuf>,

    /// Completion cache path.
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// GitHub API base URL (GitHub Enterprise).
    #[arg(long)]
    api_url: Option<String>,

    /// Show project histograms and exit without migrating.
    #[arg(long)]
    prettify: bool,

    /// Record issues in the cache without creating them on GitHub.
    #[arg(long)]
    dry_run: bool,

    /// Create milestones that don't exist on GitHub yet.
    #[arg(long)]
    create_milestones: bool,

    /// Keep the original Jira label next to its alias.
    #[arg(long)]
    keep_aliased_labels: bool,

    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

/// Log writer that clears the progress bar while a line is printed.
#[derive(Clone)]
struct ProgressWriter(ProgressBar);

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stdout().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.suspend(|| io::stdout().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Shared between the log writer and the runner; drawn once migration starts
    let progress = progress_bar();

    // Initialize tracing
    init_tracing(&progress);

    // Parse arguments
    let args = Args::parse();
    let summary_json = args.summary_json.clone();

    // Run the main logic
    match run(args, progress).await {
        Ok(Some(summary)) => {
            print_summary(&summary);

            if let Some(path) = summary_json {
                if let Err(e) = summary.write_json(&path) {
                    error!(path = %path.display(), error = %e, "Failed to write summary");
                    return ExitCode::from(2);
                }
            }

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Ok(None) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
/// - Output routed around the progress bar
fn init_tracing(progress: &ProgressBar) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(ProgressWriter(progress.clone())),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic. Returns `None` in prettify mode.
async fn run(args: Args, progress: ProgressBar) -> Result<Option<RunSummary>, RunnerError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let xml_path = require(args.xml_path.or(settings.xml_path), "xml-path")?;
    let jira_project = args.jira_project.or(settings.jira_project);

    if args.prettify {
        prettify(xml_path, jira_project)?;
        return Ok(None);
    }

    let jira_project = require(jira_project, "jira-project")?;
    let github_repo = require(args.github_repo.or(settings.github_repo), "github-repo")?;
    let github_user = require(args.github_user.or(settings.github_user), "github-user")?;
    let github_orga = args
        .github_orga
        .or(settings.github_orga)
        .unwrap_or_else(|| github_user.clone());
    let github_password = match args.github_password {
        Some(password) => password,
        None => rpassword::prompt_password("GitHub password: ").map_err(|e| {
            ConfigError::PromptError {
                name: "github-password",
                source: e,
            }
        })?,
    };

    let options = MigrationOptions {
        dry_run: args.dry_run,
        create_milestones: args.create_milestones || settings.create_milestones,
        alias_mode: if args.keep_aliased_labels || settings.keep_aliased_labels {
            AliasMode::Union
        } else {
            AliasMode::Replace
        },
    };
    if options.dry_run {
        info!("Running in dry-run mode");
    }

    let mut config = RunnerConfig::new(
        xml_path,
        jira_project,
        github_orga,
        github_repo,
        github_user,
        github_password,
    )
    .with_options(options);
    if let Some(path) = args.aliases_path.or(settings.aliases_path) {
        config = config.with_aliases_path(path);
    }
    if let Some(path) = args.cache_path.or(settings.cache_path) {
        config = config.with_cache_path(path);
    }
    if let Some(url) = args.api_url.or(settings.api_url) {
        config = config.with_api_url(parse_api_url(&url)?);
    }

    progress.set_draw_target(ProgressDrawTarget::stderr());
    let runner = Runner::new(config)?.with_progress(progress);
    runner.run().await.map(Some)
}

/// Prints histograms for one project, or for every project in the export.
fn prettify(xml_path: PathBuf, jira_project: Option<String>) -> Result<(), RunnerError> {
    let export = load_export(&xml_path)?;

    match jira_project {
        Some(key) => print!("{}", render_project(&select_project(export, &key)?)),
        None => {
            for project in export.projects.values() {
                print!("{}", render_project(project));
            }
        }
    }
    Ok(())
}

fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} issues ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()).with_style(style)
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Project: {}", summary.project);
    println!("  Issues: {}", summary.issues_total);
    println!("  Issues migrated: {}", summary.issues_migrated);
    println!("  Issues skipped (cached): {}", summary.issues_skipped);
    println!("  Issues not migrated: {}", summary.issues_not_migrated());

    if !summary.dry_run {
        println!("  Comments posted: {}", summary.comments_posted);
        println!("  Comments failed: {}", summary.comments_failed);
    }

    if !summary.failures.is_empty() {
        println!("\nCould not migrate:");
        for failure in &summary.failures {
            println!("  {} \"{}\": {}", failure.key, failure.title, failure.reason);
        }
    }

    if !summary.comment_failures.is_empty() {
        println!("\nMissing comments:");
        for failure in &summary.comment_failures {
            println!("  {} \"{}\": {}", failure.key, failure.title, failure.reason);
        }
    }
}
