#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod export;
pub mod issues;
pub mod migrator;
pub mod rate_limit;
pub mod summary;
pub mod templates;
pub mod tracker;

pub use config::{ConfigError, RepoSlug, Settings};
pub use export::{
    decode_archive, decode_json, read_export, BitbucketExport, ExportError, SourceIssue,
    EXPORT_DATA_FILE,
};
pub use issues::{derive_labels, map_status, resolve_skip, CanonicalIssue, StatusMapping};
pub use migrator::{Migrator, MigratorConfig, MigratorError};
pub use rate_limit::{next_delay, RateLimitInfo, RetryDirective, MIN_DELAY};
pub use summary::{MigrationOutcome, RunSummary, RunTally};
pub use templates::{BodyRenderer, TemplateError};
pub use tracker::{
    ApiResponse, CreatedIssue, GitHubTracker, IssuePage, IssueTracker, NewIssue, Reply,
    TrackerError, TrackerFailure,
};
