//! Bitbucket status to GitHub lifecycle mapping.

/// Lifecycle state derived from a Bitbucket status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMapping {
    /// Whether the destination issue should end up closed.
    pub closed: bool,

    /// Whether the status was one of the known Bitbucket values.
    pub recognized: bool,
}

/// Maps a Bitbucket status onto the open/closed state GitHub understands.
///
/// Matching is case-insensitive. An empty status counts as a recognized
/// open issue; any unknown value is treated as open and flagged as
/// unrecognized so the caller can report it.
#[must_use]
pub fn map_status(status: &str) -> StatusMapping {
    match status.to_lowercase().as_str() {
        "resolved" | "closed" | "invalid" | "wontfix" | "duplicate" => StatusMapping {
            closed: true,
            recognized: true,
        },
        "" | "new" | "open" | "on hold" | "onhold" => StatusMapping {
            closed: false,
            recognized: true,
        },
        _ => StatusMapping {
            closed: false,
            recognized: false,
        },
    }
}
