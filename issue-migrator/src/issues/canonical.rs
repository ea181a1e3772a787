//! Canonical issue representation.

use super::status::map_status;
use crate::export::SourceIssue;
use chrono::{DateTime, Utc};

/// A source issue normalised for the destination tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalIssue {
    /// Source ordinal identifier.
    pub id: u64,

    pub title: String,

    /// Source content, untouched.
    pub content: String,

    /// Issue body to send, with the attribution header when enabled.
    pub body: String,

    pub reporter: String,

    /// Labels in derivation order. May contain duplicates.
    pub labels: Vec<String>,

    /// Raw source status.
    pub status: String,

    /// Whether the destination issue should be closed.
    pub closed: bool,

    /// Whether `status` was a known Bitbucket value.
    pub status_recognized: bool,

    pub priority: String,
    pub kind: String,
    pub component: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
}

impl CanonicalIssue {
    /// Normalises a source issue.
    ///
    /// `extra_labels` is a comma separated list applied to every issue; it
    /// may be empty. With `attribution` set the body starts with a
    /// `by **reporter**:` header and a horizontal rule.
    #[must_use]
    pub fn from_source(source: &SourceIssue, extra_labels: &str, attribution: bool) -> Self {
        let mapping = map_status(&source.status);
        let body = if attribution {
            attributed_body(&source.reporter, &source.content)
        } else {
            source.content.clone()
        };

        Self {
            id: source.id,
            title: source.title.clone(),
            content: source.content.clone(),
            body,
            reporter: source.reporter.clone(),
            labels: derive_labels(extra_labels, source),
            status: source.status.clone(),
            closed: mapping.closed,
            status_recognized: mapping.recognized,
            priority: source.priority.clone(),
            kind: source.kind.clone(),
            component: source.component.clone(),
            created_on: source.created_on,
        }
    }
}

/// Builds the label list for a source issue.
///
/// Order: extra labels, priority, kind, component, status. Empty values are
/// never included; Bitbucket statuses are finer grained than GitHub's
/// open/closed so the raw status is kept as a label.
#[must_use]
pub fn derive_labels(extra_labels: &str, source: &SourceIssue) -> Vec<String> {
    let component = source.component.as_deref().unwrap_or_default();

    extra_labels
        .split(',')
        .map(str::trim)
        .chain([
            source.priority.as_str(),
            source.kind.as_str(),
            component,
            source.status.as_str(),
        ])
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn attributed_body(reporter: &str, content: &str) -> String {
    format!("by **{reporter}**:\n\n---\n\n{content}")
}
