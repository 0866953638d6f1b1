use std::cell::RefCell;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::domain::issue::Issue;
use crate::services::data_source::{DataSource, DataSourceError, QueryParams};

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_issue(id: u64, assignee: Option<&str>, status: &str, priority: &str) -> Issue {
    let mut issue = Issue::new(id, &format!("Issue {id}"));
    issue.assignee = assignee.map(str::to_string);
    issue.status = Some(status.to_string());
    issue.priority = Some(priority.to_string());
    issue.tracker = Some("Task".to_string());
    issue
}

pub fn issue_json(id: u64, assignee: Option<&str>, priority: &str) -> Value {
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

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory tracker that serves `projects.json` and `issues.json` slices by
/// `limit`/`offset` and records every call it receives.
#[derive(Default)]
pub struct MockDataSource {
    pub projects: Vec<Value>,
    pub issues: Vec<Value>,
    pub reported_total: Option<u64>,
    pub issue_details: Vec<Value>,
    pub fail_with: Option<u16>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, projects: Vec<Value>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_issues(mut self, issues: Vec<Value>) -> Self {
        self.issues = issues;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, method: &'static str, path: &str, query: &QueryParams, body: Option<&Value>) {
        self.calls.borrow_mut().push(RecordedCall {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            body: body.cloned(),
        });
    }

    fn check_failure(&self) -> Result<(), DataSourceError> {
        match self.fail_with {
            Some(status) => Err(DataSourceError::Status {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn page(&self, key: &str, items: &[Value], query: &QueryParams) -> Value {
        let lookup = |name: &str| {
            query
                .iter()
                .find(|(key, _)| *key == name)
                .and_then(|(_, value)| value.parse::<usize>().ok())
        };
        let limit = lookup("limit").unwrap_or(25);
        let offset = lookup("offset").unwrap_or(0);
        let page: Vec<Value> = items.iter().skip(offset).take(limit).cloned().collect();
        let total = self.reported_total.unwrap_or(items.len() as u64);
        let mut payload = serde_json::Map::new();
        payload.insert(key.to_string(), Value::Array(page));
        payload.insert("total_count".to_string(), json!(total));
        payload.insert("offset".to_string(), json!(offset));
        payload.insert("limit".to_string(), json!(limit));
        Value::Object(payload)
    }
}

impl DataSource for MockDataSource {
    fn get(&self, path: &str, query: &QueryParams) -> Result<Value, DataSourceError> {
        self.record("GET", path, query, None);
        self.check_failure()?;
        match path {
            "projects.json" => Ok(self.page("projects", &self.projects, query)),
            "issues.json" => Ok(self.page("issues", &self.issues, query)),
            _ => {
                let detail = self.issue_details.iter().find(|detail| {
                    detail["id"]
                        .as_u64()
                        .is_some_and(|id| path == format!("issues/{id}.json"))
                });
                match detail {
                    Some(issue) => Ok(json!({ "issue": issue })),
                    None => Err(DataSourceError::Status {
                        status: 404,
                        message: "Not Found".to_string(),
                    }),
                }
            }
        }
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, DataSourceError> {
        self.record("POST", path, &Vec::new(), Some(body));
        self.check_failure()?;
        let mut issue = body["issue"].clone();
        issue["id"] = json!(1001);
        Ok(json!({ "issue": issue }))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, DataSourceError> {
        self.record("PUT", path, &Vec::new(), Some(body));
        self.check_failure()?;
        Ok(Value::Null)
    }
}
