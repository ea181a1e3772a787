use issue_migrator::{GitHubTracker, IssueTracker, NewIssue, TrackerError};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tracker(server: &MockServer) -> GitHubTracker {
    GitHubTracker::new(
        "test-token",
        "acme/widgets".parse().unwrap(),
        Some(&server.uri()),
    )
    .unwrap()
}

fn new_issue() -> NewIssue {
    NewIssue {
        title: "Parser rejects empty input".to_string(),
        body: "by **sam**:\n\n---\n\nSteps".to_string(),
        labels: vec!["major".to_string(), "bug".to_string()],
        closed: true,
    }
}

#[tokio::test]
async fn lists_issues_with_quota() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"number": 1}, {"number": 2}, {"number": 3}]))
                .insert_header("X-RateLimit-Remaining", "4999")
                .insert_header("X-RateLimit-Reset", "1700000000")
                .insert_header("X-RateLimit-Limit", "5000"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = tracker(&server).list_issues(1).await.unwrap();

    assert_eq!(reply.value.count, 3);
    assert!(!reply.value.has_more);
    assert_eq!(reply.response.status, Some(200));
    assert_eq!(reply.response.quota.unwrap().remaining, 4999);
}

#[tokio::test]
async fn creates_issue_with_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .and(body_partial_json(json!({
            "title": "Parser rejects empty input",
            "labels": ["major", "bug"]
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({
                    "number": 7,
                    "html_url": "https://github.com/acme/widgets/issues/7"
                }))
                .insert_header("Retry-After", "2"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = tracker(&server).create_issue(&new_issue()).await.unwrap();

    assert_eq!(reply.value.number, 7);
    assert_eq!(reply.value.url, "https://github.com/acme/widgets/issues/7");
    assert_eq!(reply.response.retry_after(), "2");
}

#[tokio::test]
async fn create_failure_keeps_response_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "You have exceeded a secondary rate limit"}))
                .insert_header("Retry-After", "60"),
        )
        .mount(&server)
        .await;

    let failure = tracker(&server)
        .create_issue(&new_issue())
        .await
        .unwrap_err();

    assert_eq!(failure.response.status, Some(403));
    assert_eq!(failure.response.retry_after(), "60");
    assert!(matches!(
        failure.error,
        TrackerError::Status { status: 403, ref message }
            if message.contains("secondary rate limit")
    ));
}

#[tokio::test]
async fn closes_issue() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/issues/7"))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"number": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = tracker(&server).set_closed(7, true).await.unwrap();

    assert_eq!(reply.response.status, Some(200));
}

#[tokio::test]
async fn close_of_missing_issue_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/issues/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let failure = tracker(&server).set_closed(99, true).await.unwrap_err();

    assert_eq!(failure.to_string(), "Request failed with status 404: Not Found");
}

#[tokio::test]
async fn octocat_decorates_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/octocat"))
        .and(query_param("s", "Imported 5, Errors 0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("MEOW Imported 5, Errors 0"))
        .mount(&server)
        .await;

    let banner = tracker(&server).octocat("Imported 5, Errors 0").await;

    assert_eq!(banner.as_deref(), Some("MEOW Imported 5, Errors 0"));
}
