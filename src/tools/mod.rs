pub mod dashboard_tool;
pub mod issue_tool;
pub mod registry;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::services::dashboard::DashboardError;
use crate::services::data_source::DataSourceError;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Fetch(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<DataSourceError> for ToolError {
    fn from(error: DataSourceError) -> Self {
        match error {
            DataSourceError::Status { .. } | DataSourceError::Parse(_) => {
                ToolError::Fetch(error.to_string())
            }
            DataSourceError::Connection(_) | DataSourceError::Config(_) => {
                ToolError::Unexpected(error.to_string())
            }
        }
    }
}

impl From<DashboardError> for ToolError {
    fn from(error: DashboardError) -> Self {
        match error {
            DashboardError::ProjectNotFound(_) => ToolError::NotFound(error.to_string()),
            DashboardError::Fetch(source) => source.into(),
            DashboardError::Render(render) => ToolError::Unexpected(render.to_string()),
        }
    }
}

/// The `{success, result | error}` envelope handed back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    pub fn success(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: &ToolError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

pub trait Tool {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
    fn run(&self, arguments: &Value) -> Result<Value, ToolError>;

    /// Runs the tool and converts every error into a failure envelope.
    fn execute(&self, arguments: &Value) -> ToolResponse {
        match self.run(arguments) {
            Ok(result) => ToolResponse::success(result),
            Err(error) => {
                match &error {
                    ToolError::Unexpected(message) => {
                        log::error!("{} failed unexpectedly: {message}", self.name())
                    }
                    other => log::warn!("{} rejected request: {other}", self.name()),
                }
                ToolResponse::failure(&error)
            }
        }
    }
}

pub(crate) fn parse_arguments<T: DeserializeOwned>(arguments: &Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(arguments)
        .map_err(|err| ToolError::Validation(format!("invalid arguments: {err}")))
}

/// Accepts either a JSON number or a non-empty string.
pub(crate) fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}
