//! GitHub implementation of [`IssueTracker`].

use super::{
    ApiResponse, CreatedIssue, IssuePage, IssueTracker, NewIssue, Reply, TrackerError,
    TrackerFailure,
};
use crate::config::RepoSlug;
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, Instrument};

/// Page size used when enumerating existing issues (GitHub's maximum).
pub const ISSUES_PER_PAGE: usize = 100;

/// GitHub issues of a single repository, accessed through octocrab.
///
/// Requests go through octocrab's raw `_get`/`_post`/`_patch` methods so the
/// `Retry-After` and `X-RateLimit-*` headers of every response stay visible.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    repository: RepoSlug,
}

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    labels: &'a [String],
}

#[derive(Serialize)]
struct UpdateStateRequest {
    state: &'static str,
}

#[derive(Deserialize)]
struct IssueCreatedResponse {
    number: u64,
    #[serde(default)]
    html_url: String,
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubTracker {
    /// Builds an authenticated client for `repository`.
    ///
    /// `api_url` overrides the API root, e.g. for GitHub Enterprise.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::GitHubError`] if the client cannot be built.
    pub fn new(
        token: &str,
        repository: RepoSlug,
        api_url: Option<&str>,
    ) -> Result<Self, TrackerError> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }
        Ok(Self::from_octocrab(builder.build()?, repository))
    }

    /// Wraps an already configured octocrab client.
    pub fn from_octocrab(octocrab: Octocrab, repository: RepoSlug) -> Self {
        Self {
            octocrab,
            repository,
        }
    }

    /// The repository this tracker writes to.
    pub fn repository(&self) -> &RepoSlug {
        &self.repository
    }

    fn issues_route(&self) -> String {
        format!(
            "/repos/{}/{}/issues",
            self.repository.owner(),
            self.repository.name()
        )
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_issues(&self, page: u32) -> Result<Reply<IssuePage>, TrackerFailure> {
        let route = format!(
            "{}?state=all&per_page={ISSUES_PER_PAGE}&page={page}",
            self.issues_route()
        );

        async {
            let response = self
                .octocrab
                ._get(route)
                .await
                .map_err(TrackerFailure::without_response)?;
            let meta = response_meta(&response);
            let text = self
                .octocrab
                .body_to_string(response)
                .await
                .map_err(|e| TrackerFailure::new(meta.clone(), e))?;
            ensure_success(&meta, &text)?;

            let items: Vec<IgnoredAny> =
                serde_json::from_str(&text).map_err(|e| TrackerFailure::new(meta.clone(), e))?;
            debug!(count = items.len(), "Listed issues");

            Ok(Reply::new(
                IssuePage {
                    count: items.len(),
                    has_more: items.len() >= ISSUES_PER_PAGE,
                },
                meta,
            ))
        }
        .instrument(info_span!("list_issues", page))
        .await
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Reply<CreatedIssue>, TrackerFailure> {
        let request = CreateIssueRequest {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
        };

        let response = self
            .octocrab
            ._post(self.issues_route(), Some(&request))
            .await
            .map_err(TrackerFailure::without_response)?;
        let meta = response_meta(&response);
        let text = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| TrackerFailure::new(meta.clone(), e))?;
        ensure_success(&meta, &text)?;

        let created: IssueCreatedResponse =
            serde_json::from_str(&text).map_err(|e| TrackerFailure::new(meta.clone(), e))?;
        Ok(Reply::new(
            CreatedIssue {
                number: created.number,
                url: created.html_url,
            },
            meta,
        ))
    }

    async fn set_closed(&self, number: u64, closed: bool) -> Result<Reply<()>, TrackerFailure> {
        let request = UpdateStateRequest {
            state: if closed { "closed" } else { "open" },
        };

        let response = self
            .octocrab
            ._patch(format!("{}/{number}", self.issues_route()), Some(&request))
            .await
            .map_err(TrackerFailure::without_response)?;
        let meta = response_meta(&response);
        let text = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| TrackerFailure::new(meta.clone(), e))?;
        ensure_success(&meta, &text)?;

        Ok(Reply::new((), meta))
    }

    async fn octocat(&self, message: &str) -> Option<String> {
        let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
        let response = self.octocrab._get(format!("/octocat?s={encoded}")).await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        self.octocrab.body_to_string(response).await.ok()
    }
}

/// Extracts the pacing-relevant parts of a response.
fn response_meta<B>(response: &http::Response<B>) -> ApiResponse {
    let headers = response.headers();
    ApiResponse {
        status: Some(response.status().as_u16()),
        retry_after: headers
            .get(http::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        quota: RateLimitInfo::from_headers(headers),
    }
}

/// Turns a non-2xx response into a failure carrying GitHub's message.
fn ensure_success(meta: &ApiResponse, body: &str) -> Result<(), TrackerFailure> {
    let status = meta.status.unwrap_or_default();
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = serde_json::from_str::<GitHubErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    Err(TrackerFailure::new(
        meta.clone(),
        TrackerError::Status { status, message },
    ))
}
