#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::Filter;

pub const API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct MockRedmine {
    pub projects: Vec<Value>,
    pub issues: Vec<Value>,
    pub issue_details: HashMap<String, Value>,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

pub fn issue(id: u64, assignee: Option<&str>, priority: &str) -> Value {
    let mut issue = json!({
        "id": id,
        "subject": format!("Issue {id}"),
        "status": {"id": 1, "name": "New"},
        "priority": {"id": 2, "name": priority},
        "tracker": {"id": 2, "name": "Task"},
        "created_on": "2026-01-12T10:13:04Z"
    });
    if let Some(name) = assignee {
        issue["assigned_to"] = json!({"id": 9, "name": name});
    }
    issue
}

fn page(key: &str, items: &[Value], query: &HashMap<String, String>) -> Value {
    let limit = query.get("limit").and_then(|v| v.parse::<usize>().ok()).unwrap_or(25);
    let offset = query.get("offset").and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
    let slice: Vec<Value> = items.iter().skip(offset).take(limit).cloned().collect();
    let mut payload = serde_json::Map::new();
    payload.insert(key.to_string(), Value::Array(slice));
    payload.insert("total_count".to_string(), json!(items.len()));
    payload.insert("offset".to_string(), json!(offset));
    payload.insert("limit".to_string(), json!(limit));
    Value::Object(payload)
}

fn authorized(key: &Option<String>) -> bool {
    key.as_deref() == Some(API_KEY)
}

fn record(
    log: &RequestLog,
    method: &'static str,
    path: String,
    query: HashMap<String, String>,
    body: Option<Value>,
) {
    log.lock().unwrap().push(RecordedRequest {
        method,
        path,
        query,
        body,
    });
}

/// Serves the Redmine JSON endpoints used by the tools on an ephemeral port.
pub fn spawn_redmine(mock: MockRedmine) -> (SocketAddr, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let mock = Arc::new(mock);

    let projects = {
        let (log, mock) = (log.clone(), mock.clone());
        warp::path("projects.json")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::header::optional::<String>("x-redmine-api-key"))
            .and(warp::query::<HashMap<String, String>>())
            .map(move |key: Option<String>, query: HashMap<String, String>| {
                record(&log, "GET", "projects.json".to_string(), query.clone(), None);
                if !authorized(&key) {
                    return warp::reply::with_status(
                        warp::reply::json(&json!({})),
                        StatusCode::UNAUTHORIZED,
                    );
                }
                warp::reply::with_status(
                    warp::reply::json(&page("projects", &mock.projects, &query)),
                    StatusCode::OK,
                )
            })
    };

    let list_issues = {
        let (log, mock) = (log.clone(), mock.clone());
        warp::path("issues.json")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::header::optional::<String>("x-redmine-api-key"))
            .and(warp::query::<HashMap<String, String>>())
            .map(move |key: Option<String>, query: HashMap<String, String>| {
                record(&log, "GET", "issues.json".to_string(), query.clone(), None);
                if !authorized(&key) {
                    return warp::reply::with_status(
                        warp::reply::json(&json!({})),
                        StatusCode::UNAUTHORIZED,
                    );
                }
                warp::reply::with_status(
                    warp::reply::json(&page("issues", &mock.issues, &query)),
                    StatusCode::OK,
                )
            })
    };

    let create_issue = {
        let log = log.clone();
        warp::path("issues.json")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json::<Value>())
            .map(move |body: Value| {
                record(&log, "POST", "issues.json".to_string(), HashMap::new(), Some(body.clone()));
                if body["issue"]["subject"].as_str().unwrap_or_default().is_empty() {
                    return warp::reply::with_status(
                        warp::reply::json(&json!({"errors": ["Subject cannot be blank"]})),
                        StatusCode::UNPROCESSABLE_ENTITY,
                    );
                }
                let mut issue = body["issue"].clone();
                issue["id"] = json!(1001);
                warp::reply::with_status(
                    warp::reply::json(&json!({ "issue": issue })),
                    StatusCode::CREATED,
                )
            })
    };

    let get_issue = {
        let (log, mock) = (log.clone(), mock.clone());
        warp::path!("issues" / String)
            .and(warp::get())
            .map(move |file: String| {
                let path = format!("issues/{file}");
                record(&log, "GET", path.clone(), HashMap::new(), None);
                match mock.issue_details.get(&path) {
                    Some(issue) => warp::reply::with_status(
                        warp::reply::json(&json!({ "issue": issue })),
                        StatusCode::OK,
                    ),
                    None => warp::reply::with_status(
                        warp::reply::json(&json!({})),
                        StatusCode::NOT_FOUND,
                    ),
                }
            })
    };

    let update_issue = {
        let log = log.clone();
        warp::path!("issues" / String)
            .and(warp::put())
            .and(warp::body::json::<Value>())
            .map(move |file: String, body: Value| {
                record(&log, "PUT", format!("issues/{file}"), HashMap::new(), Some(body));
                warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT)
            })
    };

    let routes = projects
        .or(list_issues)
        .or(create_issue)
        .or(get_issue)
        .or(update_issue);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, log)
}

/// Runs the binary on a blocking thread and returns (success, stdout, stderr).
pub async fn run_cli(args: Vec<String>, api_url: Option<String>) -> (bool, String, String) {
    tokio::task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("redmine-tools");
        // Set explicitly, even when blank, so a developer's `.env` cannot
        // point the binary at a real tracker.
        cmd.env("REDMINE_API_URL", api_url.unwrap_or_default())
            .env("REDMINE_PAGE_SIZE", "")
            .env("REDMINE_TIMEOUT_SECS", "")
            .env("REDMINE_API_KEY", API_KEY)
            .env("RUST_LOG", "off");
        cmd.args(&args);
        let output = cmd.output().unwrap();
        (
            output.status.success(),
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap(),
        )
    })
    .await
    .unwrap()
}

pub fn requests(log: &RequestLog) -> Vec<RecordedRequest> {
    log.lock().unwrap().clone()
}
