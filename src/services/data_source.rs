use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Query parameters appended to a request, in order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Describes the JSON endpoints of the issue tracker.
///
/// Paths are relative to the configured API root, e.g. `issues.json`.
pub trait DataSource {
    fn get(&self, path: &str, query: &QueryParams) -> Result<Value, DataSourceError>;
    fn post(&self, path: &str, body: &Value) -> Result<Value, DataSourceError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, DataSourceError>;
}

/// Stands in for the live client when configuration is incomplete, so tools
/// can still validate their arguments and report the problem in an envelope.
pub struct UnconfiguredSource {
    reason: String,
}

impl UnconfiguredSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> DataSourceError {
        DataSourceError::Config(self.reason.clone())
    }
}

impl DataSource for UnconfiguredSource {
    fn get(&self, _path: &str, _query: &QueryParams) -> Result<Value, DataSourceError> {
        Err(self.error())
    }

    fn post(&self, _path: &str, _body: &Value) -> Result<Value, DataSourceError> {
        Err(self.error())
    }

    fn put(&self, _path: &str, _body: &Value) -> Result<Value, DataSourceError> {
        Err(self.error())
    }
}
