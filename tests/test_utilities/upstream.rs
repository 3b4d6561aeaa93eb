//! Local axum server standing in for GitHub and the policy engine.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const GITHUB_TOKEN: &str = "gh-token";
pub const IQ_AUTH: &str = "admin:admin123";
/// `Basic` credentials for `admin:admin123`
const IQ_BASIC_AUTH: &str = "Basic YWRtaW46YWRtaW4xMjM=";
pub const IQ_APP: &str = "my-app";
const IQ_APP_ID: &str = "4537e6fe68c24dd5ac83efd97d4fc2f4";

pub const REPOSITORY: &str = "octo/widgets";
pub const PULL_NUMBER: u64 = 7;

/// A package.json change adding `left-pad` (remediable) and `broken` (the
/// policy engine fails on it)
pub const PACKAGE_JSON_PATCH: &str = "@@ -1,5 +1,7 @@\n {\n   \"dependencies\": {\n+    \"left-pad\": \"1.0.0\",\n+    \"broken\": \"1.0.0\",\n     \"zod\": \"3.22.4\"\n   }\n }";

/// Requests observed by the mock upstream
#[derive(Default)]
pub struct UpstreamState {
    pub files: Mutex<Vec<Value>>,
    pub comments: Mutex<Vec<String>>,
    pub file_requests: AtomicUsize,
    pub application_lookups: AtomicUsize,
    pub evaluations: AtomicUsize,
    pub stages: Mutex<Vec<String>>,
}

impl UpstreamState {
    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }

    pub fn file_requests(&self) -> usize {
        self.file_requests.load(Ordering::SeqCst)
    }

    pub fn application_lookups(&self) -> usize {
        self.application_lookups.load(Ordering::SeqCst)
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

pub struct Upstream {
    pub base_url: String,
    pub state: Arc<UpstreamState>,
}

impl Upstream {
    /// Starts the mock upstream listing the given pull-request files
    pub async fn start(files: Vec<Value>) -> Self {
        let state = Arc::new(UpstreamState::default());
        *state.files.lock().unwrap() = files;

        let router = Router::new()
            .route(
                "/repos/{owner}/{repo}/pulls/{number}/files",
                get(list_files),
            )
            .route(
                "/repos/{owner}/{repo}/issues/{number}/comments",
                post(create_comment),
            )
            .route("/api/v2/applications", get(lookup_application))
            .route(
                "/api/v2/components/remediation/application/{id}",
                post(remediation),
            )
            .with_state(Arc::clone(&state));

        let base_url = serve(router).await;
        Self { base_url, state }
    }

    pub fn pull_request_url(&self) -> String {
        format!("{}/repos/{}/pulls/{}", self.base_url, REPOSITORY, PULL_NUMBER)
    }

    pub fn comments_url(&self) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_url, REPOSITORY, PULL_NUMBER
        )
    }
}

/// Serves a router on an ephemeral local port, returning its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// The changed files of the default test pull request
pub fn default_files() -> Vec<Value> {
    vec![
        json!({"filename": "package.json", "status": "modified", "patch": PACKAGE_JSON_PATCH}),
        json!({"filename": "README.md", "status": "modified", "patch": "@@ -1 +1 @@\n-old\n+new"}),
    ]
}

/// A GitHub `pull_request` delivery pointing at the mock upstream
pub fn pull_request_payload(upstream: &Upstream) -> Value {
    json!({
        "action": "opened",
        "number": PULL_NUMBER,
        "pull_request": {
            "url": upstream.pull_request_url(),
            "comments_url": upstream.comments_url(),
            "number": PULL_NUMBER
        },
        "repository": {
            "full_name": REPOSITORY,
            "html_url": format!("https://github.com/{}", REPOSITORY)
        }
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn github_authorized(headers: &HeaderMap) -> bool {
    let expected = format!("token {}", GITHUB_TOKEN);
    header(headers, "authorization") == Some(expected.as_str())
}

async fn list_files(
    State(state): State<Arc<UpstreamState>>,
    Path((_owner, _repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    state.file_requests.fetch_add(1, Ordering::SeqCst);

    if !github_authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Bad credentials").into_response();
    }
    if number != PULL_NUMBER {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    let files = state.files.lock().unwrap().clone();
    Json(Value::Array(files)).into_response()
}

async fn create_comment(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !github_authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Bad credentials").into_response();
    }

    let text = body["body"].as_str().unwrap_or_default().to_string();
    state.comments.lock().unwrap().push(text);
    (StatusCode::CREATED, Json(json!({"id": 1}))).into_response()
}

async fn lookup_application(
    State(state): State<Arc<UpstreamState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.application_lookups.fetch_add(1, Ordering::SeqCst);

    if header(&headers, "authorization") != Some(IQ_BASIC_AUTH) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let applications = match query.get("publicId").map(String::as_str) {
        Some(IQ_APP) => vec![json!({"id": IQ_APP_ID, "publicId": IQ_APP, "name": "My App"})],
        _ => vec![],
    };
    Json(json!({ "applications": applications })).into_response()
}

async fn remediation(
    State(state): State<Arc<UpstreamState>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.evaluations.fetch_add(1, Ordering::SeqCst);

    if header(&headers, "authorization") != Some(IQ_BASIC_AUTH) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != IQ_APP_ID {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(stage) = query.get("stageId") {
        state.stages.lock().unwrap().push(stage.clone());
    }

    match body["packageUrl"].as_str() {
        Some("pkg:npm/left-pad@1.0.0") => Json(json!({
            "remediation": {
                "versionChanges": [
                    {
                        "type": "next-non-failing",
                        "data": {"component": {
                            "packageUrl": "pkg:npm/left-pad@1.1.0",
                            "componentIdentifier": {"format": "npm", "coordinates": {"packageId": "left-pad", "version": "1.1.0"}}
                        }}
                    },
                    {
                        "type": "next-no-violations",
                        "data": {"component": {
                            "packageUrl": "pkg:npm/left-pad@1.3.0",
                            "componentIdentifier": {"format": "npm", "coordinates": {"packageId": "left-pad", "version": "1.3.0"}}
                        }}
                    }
                ]
            }
        }))
        .into_response(),
        Some("pkg:npm/broken@1.0.0") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "evaluation failed").into_response()
        }
        _ => Json(json!({"remediation": {"versionChanges": []}})).into_response(),
    }
}
