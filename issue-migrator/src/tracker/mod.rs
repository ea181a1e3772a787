//! Destination issue tracker capability.
//!
//! The migrator talks to the destination only through [`IssueTracker`], so
//! it can be driven against GitHub ([`GitHubTracker`]) or an in-memory fake.
//! Every call returns the response metadata alongside its result, whether
//! it succeeded or not, because pacing depends on it.

mod error;
mod github;

pub use error::{TrackerError, TrackerFailure};
pub use github::{GitHubTracker, ISSUES_PER_PAGE};

use crate::rate_limit::{RateLimitInfo, RetryDirective};
use async_trait::async_trait;

/// Response metadata relevant to pacing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,

    /// Raw `Retry-After` header value.
    pub retry_after: Option<String>,

    /// Quota reported by the `X-RateLimit-*` headers.
    pub quota: Option<RateLimitInfo>,
}

impl ApiResponse {
    /// The `Retry-After` value, or an empty string if absent.
    #[must_use]
    pub fn retry_after(&self) -> &str {
        self.retry_after.as_deref().unwrap_or_default()
    }

    /// The pause this response asks for before the next call.
    #[must_use]
    pub fn retry_directive(&self, now: u64) -> RetryDirective {
        RetryDirective::for_response(self.retry_after(), self.quota.as_ref(), now)
    }
}

/// A successful tracker call.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub value: T,
    pub response: ApiResponse,
}

impl<T> Reply<T> {
    pub fn new(value: T, response: ApiResponse) -> Self {
        Self { value, response }
    }
}

/// One page of the destination's existing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuePage {
    /// Issues on this page.
    pub count: usize,

    /// Whether another page may follow.
    pub has_more: bool,
}

/// An issue to create on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    /// Labels to attach. Empty when label attachment is disabled.
    pub labels: Vec<String>,
    /// Whether the issue is meant to end up closed.
    pub closed: bool,
}

/// An issue the destination has created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Destination issue number.
    pub number: u64,
    /// Destination issue URL.
    pub url: String,
}

/// Operations the migrator needs from the destination tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Lists one page (1-based) of all issues in the repository, open or
    /// closed.
    async fn list_issues(&self, page: u32) -> Result<Reply<IssuePage>, TrackerFailure>;

    /// Creates an issue.
    ///
    /// Trackers that cannot create closed issues directly ignore
    /// [`NewIssue::closed`]; the migrator closes those with [`set_closed`].
    ///
    /// [`set_closed`]: IssueTracker::set_closed
    async fn create_issue(&self, issue: &NewIssue) -> Result<Reply<CreatedIssue>, TrackerFailure>;

    /// Opens or closes an existing issue.
    async fn set_closed(&self, number: u64, closed: bool) -> Result<Reply<()>, TrackerFailure>;

    /// Decorates a message, GitHub's Octocat style. Purely cosmetic.
    async fn octocat(&self, _message: &str) -> Option<String> {
        None
    }
}
