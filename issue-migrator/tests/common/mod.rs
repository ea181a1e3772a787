//! In-memory issue tracker used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use issue_migrator::{
    ApiResponse, CreatedIssue, IssuePage, IssueTracker, NewIssue, Reply, SourceIssue,
    TrackerError, TrackerFailure,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// An issue stored by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub closed: bool,
}

/// A call received by the fake, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(u32),
    Create(String),
    Close(u64),
}

#[derive(Default)]
struct State {
    issues: Vec<StoredIssue>,
    calls: Vec<Call>,
}

/// Behaves like a GitHub repository: sequential numbering, paged listing.
pub struct FakeTracker {
    state: Mutex<State>,
    page_size: usize,
    retry_after: Option<String>,
    fail_list: bool,
    fail_create: HashSet<String>,
    fail_close: HashSet<String>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: 100,
            retry_after: None,
            fail_list: false,
            fail_create: HashSet::new(),
            fail_close: HashSet::new(),
        }
    }

    /// Pre-populates the repository with `count` issues.
    pub fn with_existing(self, count: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for i in 0..count {
                let number = state.issues.len() as u64 + 1;
                state.issues.push(StoredIssue {
                    number,
                    title: format!("existing {i}"),
                    body: String::new(),
                    labels: Vec::new(),
                    closed: false,
                });
            }
        }
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Every response carries this `Retry-After` value.
    pub fn with_retry_after(mut self, retry_after: &str) -> Self {
        self.retry_after = Some(retry_after.to_string());
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Creating an issue with this title fails.
    pub fn failing_create(mut self, title: &str) -> Self {
        self.fail_create.insert(title.to_string());
        self
    }

    /// Closing the issue with this title fails.
    pub fn failing_close(mut self, title: &str) -> Self {
        self.fail_close.insert(title.to_string());
        self
    }

    pub fn issues(&self) -> Vec<StoredIssue> {
        self.state.lock().unwrap().issues.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_titles(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(title) => Some(title),
                _ => None,
            })
            .collect()
    }

    fn response(&self, status: u16) -> ApiResponse {
        ApiResponse {
            status: Some(status),
            retry_after: self.retry_after.clone(),
            quota: None,
        }
    }

    fn failure(&self, status: u16, message: &str) -> TrackerFailure {
        TrackerFailure::new(
            self.response(status),
            TrackerError::Status {
                status,
                message: message.to_string(),
            },
        )
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn list_issues(&self, page: u32) -> Result<Reply<IssuePage>, TrackerFailure> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List(page));
        if self.fail_list {
            return Err(self.failure(404, "Not Found"));
        }

        let start = (page as usize - 1) * self.page_size;
        let count = state
            .issues
            .len()
            .saturating_sub(start)
            .min(self.page_size);
        Ok(Reply::new(
            IssuePage {
                count,
                has_more: count == self.page_size,
            },
            self.response(200),
        ))
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Reply<CreatedIssue>, TrackerFailure> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(issue.title.clone()));
        if self.fail_create.contains(&issue.title) {
            return Err(self.failure(422, "Validation Failed"));
        }

        let number = state.issues.len() as u64 + 1;
        state.issues.push(StoredIssue {
            number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            closed: false,
        });
        Ok(Reply::new(
            CreatedIssue {
                number,
                url: format!("https://github.test/issues/{number}"),
            },
            self.response(201),
        ))
    }

    async fn set_closed(&self, number: u64, closed: bool) -> Result<Reply<()>, TrackerFailure> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Close(number));

        let fail_close = &self.fail_close;
        let Some(issue) = state.issues.iter_mut().find(|i| i.number == number) else {
            return Err(self.failure(404, "Not Found"));
        };
        if fail_close.contains(&issue.title) {
            return Err(self.failure(500, "Server Error"));
        }
        issue.closed = closed;
        Ok(Reply::new((), self.response(200)))
    }
}

/// A source issue with the given id, title and status.
pub fn source_issue(id: u64, title: &str, status: &str) -> SourceIssue {
    SourceIssue {
        id,
        title: title.to_string(),
        content: format!("Content of {title}"),
        status: status.to_string(),
        priority: "major".to_string(),
        kind: "bug".to_string(),
        reporter: "sam".to_string(),
        ..Default::default()
    }
}
