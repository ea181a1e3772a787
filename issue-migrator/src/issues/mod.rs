//! Tracker-agnostic issue model.
//!
//! Source records are normalised into [`CanonicalIssue`] values before they
//! are turned into destination requests. This module also holds the two
//! pure decisions the migrator makes about each record: which lifecycle
//! state it maps to ([`map_status`]) and whether an earlier run already
//! migrated it ([`resolve_skip`]).

mod canonical;
mod skip;
mod status;

pub use canonical::{derive_labels, CanonicalIssue};
pub use skip::resolve_skip;
pub use status::{map_status, StatusMapping};
