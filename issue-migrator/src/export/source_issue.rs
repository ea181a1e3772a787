//! Bitbucket export schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// The decoded contents of a Bitbucket `db-1.0.json` export.
///
/// Only the parts the migrator uses are modelled; everything else in the
/// file (logs, comments, attachments, milestones, versions) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitbucketExport {
    /// Issues in export order.
    #[serde(default)]
    pub issues: Vec<SourceIssue>,

    /// Repository-level defaults.
    #[serde(default)]
    pub meta: ExportMeta,

    /// Components declared on the source repository.
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Repository-level defaults recorded in the export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportMeta {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub default_kind: String,
}

/// A named component.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// One issue as recorded by Bitbucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceIssue {
    /// Ordinal identifier. Unique, but not necessarily contiguous.
    pub id: u64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    /// Free-text status, e.g. `new`, `resolved`, `on hold`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub priority: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub kind: String,

    #[serde(default)]
    pub component: Option<String>,

    /// Reporter's username. Anonymous reports come through as `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reporter: String,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub content_updated_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub edited_on: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
