//! Migrator error types.

use crate::tracker::TrackerFailure;

/// Errors that abort a migration run.
///
/// Per-issue failures never end up here; they are recorded as
/// [`MigrationOutcome`](crate::summary::MigrationOutcome)s instead.
#[derive(Debug, thiserror::Error)]
pub enum MigratorError {
    /// Existing destination issues could not be listed.
    #[error("Error enumerating existing issues: {0}")]
    Enumeration(#[source] TrackerFailure),
}
