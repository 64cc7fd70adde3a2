use jira_migrate::{
    build_client, parse_api_url, GitHubTracker, IssueTracker, NewIssue, TrackerError,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const OWNER: &str = "acme";
const REPO: &str = "widgets";

// "bot:pw"
const BASIC_AUTH: &str = "Basic Ym90OnB3";

fn tracker(server: &MockServer) -> GitHubTracker {
    let api_url = parse_api_url(&format!("{}/api/v3", server.uri())).unwrap();
    let octocrab = build_client("bot", "pw", Some(&api_url)).unwrap();
    GitHubTracker::new(octocrab, OWNER, REPO)
}

fn repo_path(suffix: &str) -> String {
    format!("/api/v3/repos/{OWNER}/{REPO}{suffix}")
}

fn user_json() -> Value {
    let base = "https://github.example.com/api/v3/users/bot";
    json!({
        "login": "bot",
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://github.example.com/avatars/u/1",
        "gravatar_id": "",
        "url": base,
        "html_url": "https://github.example.com/bot",
        "followers_url": format!("{base}/followers"),
        "following_url": format!("{base}/following"),
        "gists_url": format!("{base}/gists"),
        "starred_url": format!("{base}/starred"),
        "subscriptions_url": format!("{base}/subscriptions"),
        "organizations_url": format!("{base}/orgs"),
        "repos_url": format!("{base}/repos"),
        "events_url": format!("{base}/events"),
        "received_events_url": format!("{base}/received_events"),
        "type": "User",
        "site_admin": false
    })
}

fn issue_json(number: u64, title: &str) -> Value {
    let api = format!("https://github.example.com/api/v3/repos/{OWNER}/{REPO}");
    json!({
        "id": 1000 + number,
        "node_id": "MDU6SXNzdWUx",
        "url": format!("{api}/issues/{number}"),
        "repository_url": api,
        "labels_url": format!("{api}/issues/{number}/labels"),
        "comments_url": format!("{api}/issues/{number}/comments"),
        "events_url": format!("{api}/issues/{number}/events"),
        "html_url": format!("https://github.example.com/{OWNER}/{REPO}/issues/{number}"),
        "number": number,
        "state": "open",
        "title": title,
        "body": null,
        "user": user_json(),
        "labels": [],
        "assignees": [],
        "locked": false,
        "comments": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

fn comment_json(issue_number: u64) -> Value {
    let api = format!("https://github.example.com/api/v3/repos/{OWNER}/{REPO}");
    json!({
        "id": 5,
        "node_id": "MDEyOklzc3VlQ29tbWVudDU=",
        "url": format!("{api}/issues/comments/5"),
        "html_url": format!(
            "https://github.example.com/{OWNER}/{REPO}/issues/{issue_number}#issuecomment-5"
        ),
        "body": "hello",
        "user": user_json(),
        "created_at": "2024-01-01T00:00:00Z"
    })
}

fn milestones_json(range: std::ops::RangeInclusive<u64>) -> Value {
    Value::Array(
        range
            .map(|number| json!({ "number": number, "title": format!("v{number}"), "state": "open" }))
            .collect(),
    )
}

fn new_issue(milestone: Option<u64>) -> NewIssue {
    NewIssue {
        title: "Crash on save".to_string(),
        body: "body".to_string(),
        labels: vec!["Bug".to_string(), "crash".to_string()],
        milestone,
    }
}

#[tokio::test]
async fn lists_milestones_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(repo_path("/milestones")))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(milestones_json(1..=100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path("/milestones")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(milestones_json(101..=101)))
        .expect(1)
        .mount(&server)
        .await;

    let milestones = tracker(&server).list_milestones().await.unwrap();

    assert_eq!(milestones.len(), 101);
    assert_eq!(milestones[100].number, 101);
    assert_eq!(milestones[100].title, "v101");
}

#[tokio::test]
async fn creates_issue_with_basic_auth_under_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("/issues")))
        .and(header("authorization", BASIC_AUTH))
        .and(body_partial_json(json!({
            "title": "Crash on save",
            "body": "body",
            "labels": ["Bug", "crash"],
            "milestone": 3
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(issue_json(42, "Crash on save")))
        .expect(1)
        .mount(&server)
        .await;

    let created = tracker(&server).create_issue(&new_issue(Some(3))).await.unwrap();

    assert_eq!(created.number, 42);
    assert_eq!(
        created.url,
        format!("https://github.example.com/{OWNER}/{REPO}/issues/42")
    );
}

#[tokio::test]
async fn rejected_issue_keeps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("/issues")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest/issues/issues#create-an-issue"
        })))
        .mount(&server)
        .await;

    let result = tracker(&server).create_issue(&new_issue(None)).await;

    match result {
        Err(TrackerError::Rejected { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn posts_comment_to_issue_number() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("/issues/42/comments")))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({ "body": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(42)))
        .expect(1)
        .mount(&server)
        .await;

    tracker(&server).create_comment(42, "hello").await.unwrap();
}

#[tokio::test]
async fn creates_milestone_by_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(repo_path("/milestones")))
        .and(body_json(json!({ "title": "2.0" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "number": 9, "title": "2.0" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let milestone = tracker(&server).create_milestone("2.0").await.unwrap();

    assert_eq!(milestone.number, 9);
    assert_eq!(milestone.title, "2.0");
}
