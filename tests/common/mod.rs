//! In-process fake of the GitHub endpoints the API depends on.
//!
//! Served on an ephemeral 127.0.0.1 port; every handler bumps `hits` so tests
//! can assert whether any upstream call happened.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{
    HeaderMap, Request, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::Barrier;
use tower::ServiceExt;

use portfolio_api::{AppConfig, AppState, build_app};

pub const TOKEN: &str = "test-token";
pub const USER: &str = "ALVINfrs";

/// How long a detail request waits for its batch before giving up.
const BARRIER_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MockGitHub {
    pub events: Value,
    pub events_status: StatusCode,
    /// Detail lookups for these SHAs answer 404.
    pub failing_shas: HashSet<String>,
    /// Detail lookups for these SHAs answer 200 with an undecodable body.
    pub malformed_shas: HashSet<String>,
    /// When set, each detail request waits here until the whole batch has arrived.
    pub detail_barrier: Option<Barrier>,
    pub graphql: Value,
    pub graphql_status: StatusCode,
    pub hits: AtomicUsize,
    pub detail_hits: AtomicUsize,
    pub graphql_username: Mutex<Option<String>>,
}

impl Default for MockGitHub {
    fn default() -> Self {
        Self {
            events: json!([]),
            events_status: StatusCode::OK,
            failing_shas: HashSet::new(),
            malformed_shas: HashSet::new(),
            detail_barrier: None,
            graphql: json!({ "data": { "user": null } }),
            graphql_status: StatusCode::OK,
            hits: AtomicUsize::new(0),
            detail_hits: AtomicUsize::new(0),
            graphql_username: Mutex::new(None),
        }
    }
}

impl MockGitHub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn detail_hits(&self) -> usize {
        self.detail_hits.load(Ordering::SeqCst)
    }
}

type Mock = Arc<MockGitHub>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn events(
    State(mock): State<Mock>,
    Path(user): Path<String>,
    headers: HeaderMap,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) || user != USER {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !mock.events_status.is_success() {
        return mock.events_status.into_response();
    }
    Json(mock.events.clone()).into_response()
}

async fn commit_detail(
    State(mock): State<Mock>,
    Path((owner, repo, sha)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    mock.detail_hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(barrier) = &mock.detail_barrier {
        if tokio::time::timeout(BARRIER_TIMEOUT, barrier.wait()).await.is_err() {
            return StatusCode::GATEWAY_TIMEOUT.into_response();
        }
    }
    if mock.failing_shas.contains(&sha) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if mock.malformed_shas.contains(&sha) {
        return (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            r#"{"files": "not-a-list""#,
        )
            .into_response();
    }
    Json(json!({
        "sha": sha,
        "commit": { "author": { "name": "Alvin", "date": "2024-03-05T09:30:00Z" } },
        "files": [
            { "filename": format!("{owner}/{repo}/{}.rs", &sha[..4]) },
            { "filename": "README.md" }
        ]
    }))
    .into_response()
}

async fn graphql(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let username = body["variables"]["username"].as_str().map(str::to_string);
    *mock.graphql_username.lock().unwrap() = username;
    if !mock.graphql_status.is_success() {
        return (mock.graphql_status, "upstream exploded").into_response();
    }
    Json(mock.graphql.clone()).into_response()
}

/// Serve the mock and return its base URL.
pub async fn spawn_mock(mock: MockGitHub) -> (String, Mock) {
    let mock = Arc::new(mock);
    let app = Router::new()
        .route("/users/{user}/events/public", get(events))
        .route("/repos/{owner}/{repo}/commits/{sha}", get(commit_detail))
        .route("/graphql", post(graphql))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), mock)
}

pub fn app_for(base_url: &str, token: Option<&str>) -> Router {
    let config = AppConfig::new(token.map(str::to_string))
        .with_github_user(USER)
        .with_api_urls(base_url, format!("{base_url}/graphql"));
    build_app(Arc::new(AppState::new(config).unwrap()))
}

/// Issue a GET against the app and return status, headers and decoded body.
pub async fn get_as<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, HeaderMap, T) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    assert_eq!(
        headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json"),
        "{uri} answered with a non-JSON body"
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, headers, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    get_as(app, uri).await
}

pub fn push_event(repo: &str, git_ref: &str, commits: &[(&str, &str)]) -> Value {
    let commits: Vec<Value> = commits
        .iter()
        .map(|(sha, message)| {
            json!({
                "sha": sha,
                "message": message,
                "author": { "name": "Alvin Faris", "email": "alvin@example.com" },
                "distinct": true
            })
        })
        .collect();
    json!({
        "id": "1",
        "type": "PushEvent",
        "repo": { "id": 1, "name": repo },
        "payload": { "ref": git_ref, "commits": commits },
        "created_at": "2024-03-05T10:00:00Z"
    })
}
