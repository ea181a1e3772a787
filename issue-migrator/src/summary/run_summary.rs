//! Run tally and summary types.

use super::result::MigrationOutcome;

/// Operation counters for one run.
///
/// `imported` counts successful API *operations*, not issues: an issue that
/// is created and then closed adds two. [`RunSummary::issues_migrated`]
/// gives the per-issue count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Successful create and close operations.
    pub imported: usize,

    /// Failed create and close operations.
    pub errors: usize,
}

impl RunTally {
    /// Adds the operations behind an outcome.
    pub fn record(&mut self, outcome: &MigrationOutcome) {
        self.imported += outcome.succeeded_operations();
        self.errors += outcome.failed_operations();
    }
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Operation counters.
    pub tally: RunTally,

    /// Outcomes in migration order.
    pub outcomes: Vec<MigrationOutcome>,

    /// Issues found in the export.
    pub source_issues: usize,

    /// Issues already present on the destination when the run started.
    pub existing_issues: usize,

    /// Source issues skipped as already migrated.
    pub skipped: usize,
}

impl RunSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new(source_issues: usize, existing_issues: usize, skipped: usize) -> Self {
        Self {
            source_issues,
            existing_issues,
            skipped,
            ..Default::default()
        }
    }

    /// Records an outcome and updates the tally.
    pub fn record(&mut self, outcome: MigrationOutcome) {
        self.tally.record(&outcome);
        self.outcomes.push(outcome);
    }

    /// Number of source issues that now exist on the destination.
    #[must_use]
    pub fn issues_migrated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.number().is_some()).count()
    }

    /// Returns true if any operation failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.tally.errors > 0
    }

    /// The one-line operator report: `Imported <N>, Errors <M>`.
    #[must_use]
    pub fn report_line(&self) -> String {
        format!(
            "Imported {}, Errors {}",
            self.tally.imported, self.tally.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_counts_as_second_operation() {
        let mut summary = RunSummary::new(3, 0, 0);

        summary.record(MigrationOutcome::Created {
            source_id: 1,
            number: 1,
        });
        summary.record(MigrationOutcome::CreatedAndClosed {
            source_id: 2,
            number: 2,
        });

        assert_eq!(summary.tally.imported, 3);
        assert_eq!(summary.tally.errors, 0);
        assert_eq!(summary.issues_migrated(), 2);
        assert!(!summary.has_failures());
        assert_eq!(summary.report_line(), "Imported 3, Errors 0");
    }

    #[test]
    fn failures_are_counted_per_operation() {
        let mut summary = RunSummary::new(2, 0, 0);

        summary.record(MigrationOutcome::FailedToCreate {
            source_id: 1,
            error: "boom".to_string(),
        });
        summary.record(MigrationOutcome::FailedToClose {
            source_id: 2,
            number: 1,
            error: "boom".to_string(),
        });

        assert_eq!(summary.tally, RunTally { imported: 1, errors: 2 });
        assert_eq!(summary.issues_migrated(), 1);
        assert!(summary.has_failures());
        assert_eq!(summary.report_line(), "Imported 1, Errors 2");
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let value = serde_json::to_value(MigrationOutcome::CreatedAndClosed {
            source_id: 4,
            number: 9,
        })
        .unwrap();
        assert_eq!(value["outcome"], "created_and_closed");
        assert_eq!(value["number"], 9);
    }
}
