//! Issue tracker error types.

use super::ApiResponse;
use thiserror::Error;

/// Errors reported by an issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// GitHub API or transport error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The tracker answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Unexpected response body: {0}")]
    DecodeError(#[from] serde_json::Error),
}

/// A failed tracker call, together with whatever response came back.
///
/// The response still carries pacing hints (`Retry-After`, quota), which the
/// migrator honours before its next call.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct TrackerFailure {
    /// Response metadata; empty if no response was received.
    pub response: ApiResponse,

    /// What went wrong.
    pub error: TrackerError,
}

impl TrackerFailure {
    /// Creates a failure with a received response.
    pub fn new(response: ApiResponse, error: impl Into<TrackerError>) -> Self {
        Self {
            response,
            error: error.into(),
        }
    }

    /// Creates a failure for a call that never got a response.
    pub fn without_response(error: impl Into<TrackerError>) -> Self {
        Self::new(ApiResponse::default(), error)
    }
}
