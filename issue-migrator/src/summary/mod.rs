//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::MigrationOutcome;
pub use run_summary::{RunSummary, RunTally};
