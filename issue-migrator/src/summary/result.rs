//! Per-issue migration outcomes.

use serde::Serialize;

/// Result of migrating a single source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Issue created and left open.
    Created {
        /// Source ordinal identifier.
        source_id: u64,
        /// Destination issue number.
        number: u64,
    },

    /// Issue created, then closed.
    CreatedAndClosed { source_id: u64, number: u64 },

    /// The create request failed; nothing was written.
    FailedToCreate { source_id: u64, error: String },

    /// The issue was created but could not be closed, so it is still open.
    FailedToClose {
        source_id: u64,
        number: u64,
        error: String,
    },
}

impl MigrationOutcome {
    /// Source ordinal identifier of the issue.
    #[must_use]
    pub fn source_id(&self) -> u64 {
        match self {
            Self::Created { source_id, .. }
            | Self::CreatedAndClosed { source_id, .. }
            | Self::FailedToCreate { source_id, .. }
            | Self::FailedToClose { source_id, .. } => *source_id,
        }
    }

    /// Destination issue number, if the issue was created.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Created { number, .. }
            | Self::CreatedAndClosed { number, .. }
            | Self::FailedToClose { number, .. } => Some(*number),
            Self::FailedToCreate { .. } => None,
        }
    }

    /// Successful API operations (create, close) behind this outcome.
    #[must_use]
    pub fn succeeded_operations(&self) -> usize {
        match self {
            Self::Created { .. } | Self::FailedToClose { .. } => 1,
            Self::CreatedAndClosed { .. } => 2,
            Self::FailedToCreate { .. } => 0,
        }
    }

    /// Failed API operations behind this outcome.
    #[must_use]
    pub fn failed_operations(&self) -> usize {
        match self {
            Self::FailedToCreate { .. } | Self::FailedToClose { .. } => 1,
            Self::Created { .. } | Self::CreatedAndClosed { .. } => 0,
        }
    }
}
