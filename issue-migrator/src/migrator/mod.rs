//! Drives a migration run.
//!
//! Issues are migrated strictly one at a time. Every call to the destination
//! is followed by the pause its response asks for, so there is never more
//! than one request in flight and the pacing GitHub asks for is honoured.

mod config;
mod error;

pub use config::MigratorConfig;
pub use error::MigratorError;

use crate::export::SourceIssue;
use crate::issues::{resolve_skip, CanonicalIssue};
use crate::rate_limit::unix_now;
use crate::summary::{MigrationOutcome, RunSummary};
use crate::templates::BodyRenderer;
use crate::tracker::{ApiResponse, IssueTracker, NewIssue};
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info, info_span, warn, Dispatch, Instrument};

/// Migrates source issues into an [`IssueTracker`].
pub struct Migrator<T> {
    tracker: T,
    config: MigratorConfig,
    renderer: BodyRenderer,
    dispatch: Option<Dispatch>,
}

impl<T: IssueTracker> Migrator<T> {
    /// Creates a migrator writing to `tracker`.
    pub fn new(tracker: T, config: MigratorConfig) -> Self {
        Self {
            tracker,
            config,
            renderer: BodyRenderer::new(),
            dispatch: None,
        }
    }

    /// Uses a custom body renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: BodyRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sends the run's diagnostics to `dispatch` instead of the ambient
    /// default subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// The destination tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Consumes the migrator, returning the destination tracker.
    pub fn into_tracker(self) -> T {
        self.tracker
    }

    /// Migrates `issues`, skipping those an earlier run already created.
    ///
    /// Issues are processed in ascending id order. Individual create or
    /// close failures are recorded in the summary and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`MigratorError::Enumeration`] if the destination's existing
    /// issues cannot be listed. Nothing is created in that case.
    pub async fn run(&self, issues: Vec<SourceIssue>) -> Result<RunSummary, MigratorError> {
        match &self.dispatch {
            Some(dispatch) => {
                self.migrate_all(issues)
                    .with_subscriber(dispatch.clone())
                    .await
            }
            None => self.migrate_all(issues).await,
        }
    }

    async fn migrate_all(&self, mut issues: Vec<SourceIssue>) -> Result<RunSummary, MigratorError> {
        issues.sort_by_key(|issue| issue.id);

        let existing = self.count_existing().await?;
        let pending = resolve_skip(&issues, existing);
        let skipped = issues.len() - pending.len();

        if existing > issues.len() {
            warn!(
                existing,
                source = issues.len(),
                "Destination has more issues than the export, nothing to migrate"
            );
        } else if skipped > 0 {
            warn!(
                skipped,
                "Skipping issues assumed to be migrated by an earlier run; \
                 this is only correct if destination numbering has no gaps"
            );
        }

        info!(count = pending.len(), "Migrating issues");
        let mut summary = RunSummary::new(issues.len(), existing, skipped);

        for source in pending {
            let outcome = self
                .migrate_issue(source)
                .instrument(info_span!("issue", id = source.id))
                .await;
            summary.record(outcome);
        }

        info!(
            imported = summary.tally.imported,
            errors = summary.tally.errors,
            issues = summary.issues_migrated(),
            "Migration finished"
        );
        Ok(summary)
    }

    /// Counts the issues (and pull requests) already on the destination.
    ///
    /// # Errors
    ///
    /// Returns [`MigratorError::Enumeration`] if any page fails.
    pub async fn count_existing(&self) -> Result<usize, MigratorError> {
        let mut total = 0;
        let mut page = 1;

        loop {
            let reply = self
                .tracker
                .list_issues(page)
                .await
                .map_err(MigratorError::Enumeration)?;
            self.pause(&reply.response).await;

            total += reply.value.count;
            if !reply.value.has_more || reply.value.count == 0 {
                break;
            }
            page += 1;
        }

        debug!(existing = total, "Enumerated existing issues");
        Ok(total)
    }

    async fn migrate_issue(&self, source: &SourceIssue) -> MigrationOutcome {
        let issue = CanonicalIssue::from_source(
            source,
            self.config.extra_labels(),
            self.config.attribution(),
        );
        if !issue.status_recognized {
            warn!(status = %issue.status, "Unknown status, treating issue as open");
        }

        let request = NewIssue {
            title: issue.title.clone(),
            body: self.renderer.render_or_raw(&issue),
            labels: if self.config.attach_labels() {
                issue.labels.clone()
            } else {
                Vec::new()
            },
            closed: issue.closed,
        };

        debug!("Creating issue");
        let created = match self.tracker.create_issue(&request).await {
            Ok(reply) => {
                self.pause(&reply.response).await;
                reply.value
            }
            Err(failure) => {
                error!(error = %failure, status = ?failure.response.status, "Error creating issue");
                self.pause(&failure.response).await;
                return MigrationOutcome::FailedToCreate {
                    source_id: issue.id,
                    error: failure.to_string(),
                };
            }
        };
        info!(number = created.number, "Created issue");

        if !issue.closed {
            return MigrationOutcome::Created {
                source_id: issue.id,
                number: created.number,
            };
        }

        debug!(number = created.number, "Closing issue");
        match self.tracker.set_closed(created.number, true).await {
            Ok(reply) => {
                self.pause(&reply.response).await;
                MigrationOutcome::CreatedAndClosed {
                    source_id: issue.id,
                    number: created.number,
                }
            }
            Err(failure) => {
                error!(number = created.number, error = %failure, "Error closing issue");
                self.pause(&failure.response).await;
                MigrationOutcome::FailedToClose {
                    source_id: issue.id,
                    number: created.number,
                    error: failure.to_string(),
                }
            }
        }
    }

    async fn pause(&self, response: &ApiResponse) {
        response.retry_directive(unix_now()).wait().await;
    }
}
