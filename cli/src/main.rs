//! CLI for the Bitbucket to GitHub issue migrator.
//!
//! Reads a Bitbucket issue export and recreates its issues in a GitHub
//! repository, one rate-limited request at a time.

use clap::Parser;
use issue_migrator::{
    read_export, BodyRenderer, ConfigError, ExportError, GitHubTracker, IssueTracker, Migrator,
    MigratorConfig, MigratorError, RepoSlug, RunSummary, Settings, TemplateError, TrackerError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::instrument::WithSubscriber;
use tracing::{error, warn, Dispatch};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code for bad arguments or configuration.
const EXIT_USAGE: u8 = 1;

/// Exit code for fatal I/O, decoding or API errors.
const EXIT_FATAL: u8 = 2;

/// Migrate a Bitbucket issue export into a GitHub repository.
///
/// The export can be obtained from the repository settings on Bitbucket
/// under "Import & export" in the issues section.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Bitbucket export zip file.
    archive: PathBuf,

    /// Destination repository, as owner/repo.
    repo: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Enable verbose debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Comma separated labels to apply to all imported issues.
    #[arg(long)]
    labels: Option<String>,

    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a Handlebars template for issue bodies.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Do not prefix issue bodies with the original reporter.
    #[arg(long)]
    no_attribution: bool,

    /// Do not attach labels to created issues.
    #[arg(long)]
    no_labels: bool,

    /// GitHub API root URL, for GitHub Enterprise.
    #[arg(long)]
    api_url: Option<String>,

    /// Have the Octocat announce the final result.
    #[arg(long)]
    octocat: bool,
}

/// Errors that end the program before a summary can be printed.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Migrator(#[from] MigratorError),
}

impl CliError {
    fn code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Template(_) => EXIT_USAGE,
            Self::Export(_) | Self::Tracker(_) | Self::Migrator(_) => EXIT_FATAL,
        }
    }

    fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let dispatch = tracing_dispatch(args.verbose);
    let migrator_dispatch = dispatch.clone();

    async move {
        match run(args, migrator_dispatch).await {
            Ok((summary, banner)) => {
                if summary.has_failures() {
                    warn!(errors = summary.tally.errors, "Migration finished with errors");
                }
                print_summary(&summary, banner);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Migration aborted");
                e.exit_code()
            }
        }
    }
    .with_subscriber(dispatch)
    .await
}

/// Builds the subscriber used for the whole run.
///
/// - Compact log formatting on stderr, without module target paths
/// - Log level filtering via `RUST_LOG`, falling back to "info", or "debug"
///   with `--verbose`
fn tracing_dispatch(verbose: bool) -> Dispatch {
    let default_level = if verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)));
    Dispatch::new(subscriber)
}

/// Main execution logic.
///
/// Returns the summary and, when available, the Octocat banner for it.
async fn run(args: Args, dispatch: Dispatch) -> Result<(RunSummary, Option<String>), CliError> {
    let repository: RepoSlug = args.repo.parse()?;
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let renderer = match args.template.as_ref().or(settings.template.as_ref()) {
        Some(path) => BodyRenderer::from_file(path)?,
        None => BodyRenderer::new(),
    };

    let config = MigratorConfig::new()
        .with_extra_labels(args.labels.or(settings.labels).unwrap_or_default())
        .with_attribution(!args.no_attribution && settings.attribution.unwrap_or(true))
        .with_attach_labels(!args.no_labels && settings.attach_labels.unwrap_or(true));

    let export = read_export(&args.archive)?;

    let api_url = args.api_url.or(settings.api_url);
    let tracker = GitHubTracker::new(&args.token, repository, api_url.as_deref())?;
    let migrator = Migrator::new(tracker, config)
        .with_renderer(renderer)
        .with_dispatch(dispatch);

    let summary = migrator.run(export.issues).await?;

    let banner = if args.octocat {
        migrator.tracker().octocat(&summary.report_line()).await
    } else {
        None
    };
    Ok((summary, banner))
}

/// Lines of the final report: the banner if any, then the counts.
fn summary_lines(summary: &RunSummary, banner: Option<String>) -> Vec<String> {
    let mut lines: Vec<String> = banner.into_iter().collect();
    lines.push(summary.report_line());
    if summary.skipped > 0 {
        lines.push(format!(
            "Skipped {} issues already present in the destination",
            summary.skipped
        ));
    }
    lines
}

/// Prints the final report to stderr.
fn print_summary(summary: &RunSummary, banner: Option<String>) {
    for line in summary_lines(summary, banner) {
        eprintln!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issue_migrator::{MigrationOutcome, TrackerFailure};

    fn status_error() -> TrackerError {
        TrackerError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        }
    }

    #[test]
    fn config_and_template_errors_exit_with_usage_code() {
        let config: CliError = "not-a-slug".parse::<RepoSlug>().unwrap_err().into();
        assert_eq!(config.code(), EXIT_USAGE);

        let template: CliError = match BodyRenderer::with_template("{{#if}}") {
            Ok(_) => panic!("unbalanced block should not register"),
            Err(e) => e.into(),
        };
        assert_eq!(template.code(), EXIT_USAGE);
    }

    #[test]
    fn export_tracker_and_migrator_errors_exit_with_fatal_code() {
        let export: CliError = ExportError::MissingDataFile {
            name: "db-1.0.json".to_string(),
        }
        .into();
        assert_eq!(export.code(), EXIT_FATAL);

        let tracker: CliError = status_error().into();
        assert_eq!(tracker.code(), EXIT_FATAL);

        let migrator: CliError =
            MigratorError::Enumeration(TrackerFailure::without_response(status_error())).into();
        assert_eq!(migrator.code(), EXIT_FATAL);
    }

    #[test]
    fn report_line_is_printed_without_banner() {
        let mut summary = RunSummary::new(1, 0, 0);
        summary.record(MigrationOutcome::Created {
            source_id: 1,
            number: 1,
        });

        assert_eq!(summary_lines(&summary, None), vec!["Imported 1, Errors 0"]);
    }

    #[test]
    fn banner_precedes_report_line() {
        let summary = RunSummary::new(0, 0, 0);
        let lines = summary_lines(&summary, Some("MMM.\n Octocat".to_string()));

        assert_eq!(lines, vec!["MMM.\n Octocat", "Imported 0, Errors 0"]);
    }

    #[test]
    fn skipped_issues_are_reported_after_counts() {
        let summary = RunSummary::new(5, 3, 3);
        let lines = summary_lines(&summary, None);

        assert_eq!(
            lines,
            vec![
                "Imported 0, Errors 0",
                "Skipped 3 issues already present in the destination",
            ]
        );
    }
}
