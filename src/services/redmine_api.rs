use std::env;
use std::fs;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::issue::Issue;
use crate::domain::project::Project;
use crate::services::data_source::{DataSource, DataSourceError, QueryParams};

pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedmineConfig {
    pub api_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl Default for RedmineConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
            page_size: 100,
        }
    }
}

impl RedmineConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, DataSourceError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|err| DataSourceError::Config(format!("failed to read config: {err}")))?;
        serde_yaml::from_str(&contents)
            .map_err(|err| DataSourceError::Config(format!("failed to parse config: {err}")))
    }

    /// Reads the optional config file, then lets `REDMINE_*` environment
    /// variables override individual options.
    pub fn load(filepath: Option<&str>) -> Result<Self, DataSourceError> {
        let mut config = match filepath {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Blank variables count as unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DataSourceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(api_url) = lookup("REDMINE_API_URL") {
            self.api_url = api_url;
        }
        if let Some(api_key) = lookup("REDMINE_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(timeout) = lookup("REDMINE_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                DataSourceError::Config(format!("invalid REDMINE_TIMEOUT_SECS: {timeout}"))
            })?;
        }
        if let Some(page_size) = lookup("REDMINE_PAGE_SIZE") {
            self.page_size = page_size.trim().parse().map_err(|_| {
                DataSourceError::Config(format!("invalid REDMINE_PAGE_SIZE: {page_size}"))
            })?;
        }
        Ok(())
    }
}

pub struct RedmineApiClient {
    config: RedmineConfig,
    client: Client,
}

impl RedmineApiClient {
    pub fn new(config: RedmineConfig) -> Result<Self, DataSourceError> {
        if config.api_url.trim().is_empty() || config.api_key.trim().is_empty() {
            return Err(DataSourceError::Config(
                "redmine config is missing api_url or api_key".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| DataSourceError::Connection(err.to_string()))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, DataSourceError> {
        let response = request
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .map_err(|err| DataSourceError::Connection(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| DataSourceError::Connection(err.to_string()))?;

        if !status.is_success() {
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|err| DataSourceError::Parse(err.to_string()))
    }
}

impl DataSource for RedmineApiClient {
    fn get(&self, path: &str, query: &QueryParams) -> Result<Value, DataSourceError> {
        log::debug!("GET {path} {query:?}");
        self.send(self.client.get(self.url(path)).query(query))
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, DataSourceError> {
        log::debug!("POST {path}");
        self.send(self.client.post(self.url(path)).json(body))
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, DataSourceError> {
        log::debug!("PUT {path}");
        self.send(self.client.put(self.url(path)).json(body))
    }
}

/// Redmine reports validation failures as `{"errors": [...]}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let errors = serde_json::from_str::<Value>(body).ok().and_then(|payload| {
        payload.get("errors").and_then(|value| value.as_array()).map(|errors| {
            errors
                .iter()
                .filter_map(|error| error.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        })
    });
    match errors {
        Some(text) if !text.is_empty() => text,
        _ => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct NamedRecord {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IssueRecord {
    pub id: u64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<NamedRecord>,
    #[serde(default)]
    pub priority: Option<NamedRecord>,
    #[serde(default)]
    pub tracker: Option<NamedRecord>,
    #[serde(default)]
    pub assigned_to: Option<NamedRecord>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
}

impl From<IssueRecord> for Issue {
    fn from(record: IssueRecord) -> Self {
        Issue {
            status: record.status.and_then(|named| named.name),
            priority: record.priority.and_then(|named| named.name),
            tracker: record.tracker.and_then(|named| named.name),
            assignee: record.assigned_to.and_then(|named| named.name),
            due_date: parse_date_opt(record.due_date.as_deref()),
            created_on: record
                .created_on
                .as_deref()
                .and_then(|text| DateTime::parse_from_rfc3339(text).ok()),
            ..Issue::new(record.id, record.subject.as_deref().unwrap_or_default())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Project {
            id: record.id,
            name: record.name,
            identifier: record.identifier,
        }
    }
}

fn parse_date_opt(value: Option<&str>) -> Option<NaiveDate> {
    let text = value?;
    let date = if let Some((date_part, _)) = text.split_once('T') {
        date_part
    } else {
        text
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
