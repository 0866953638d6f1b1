use std::rc::Rc;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::services::data_source::{DataSource, QueryParams};
use crate::tools::{id_text, parse_arguments, Tool, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    ListProjects,
    ListIssues,
    GetIssue,
    CreateIssue,
    UpdateIssue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssueToolArgs {
    action: Option<IssueAction>,
    project_id: Option<Value>,
    issue_id: Option<Value>,
    status_id: Option<Value>,
    subject: Option<String>,
    description: Option<String>,
    updates: Option<Map<String, Value>>,
    limit: Option<u32>,
    offset: Option<u32>,
}

/// Thin CRUD passthrough over the tracker's issue and project endpoints.
pub struct IssueTool {
    source: Rc<dyn DataSource>,
}

impl IssueTool {
    pub fn new(source: Rc<dyn DataSource>) -> Self {
        Self { source }
    }

    fn list_projects(&self, args: &IssueToolArgs) -> Result<Value, ToolError> {
        let query = paging(args);
        Ok(self.source.get("projects.json", &query)?)
    }

    fn list_issues(&self, args: &IssueToolArgs) -> Result<Value, ToolError> {
        let mut query = QueryParams::new();
        if let Some(project_id) = id_text(args.project_id.as_ref()) {
            query.push(("project_id", project_id));
        }
        if let Some(status_id) = id_text(args.status_id.as_ref()) {
            query.push(("status_id", status_id));
        }
        query.extend(paging(args));
        Ok(self.source.get("issues.json", &query)?)
    }

    fn get_issue(&self, args: &IssueToolArgs) -> Result<Value, ToolError> {
        let issue_id = require_issue_id(args)?;
        Ok(self.source.get(&issue_path(issue_id), &QueryParams::new())?)
    }

    fn create_issue(&self, args: &IssueToolArgs) -> Result<Value, ToolError> {
        let project_id = args.project_id.clone().filter(|value| id_text(Some(value)).is_some());
        let subject = args
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|subject| !subject.is_empty());
        let (Some(project_id), Some(subject)) = (project_id, subject) else {
            return Err(ToolError::Validation(
                "project_id and subject are required".to_string(),
            ));
        };

        let body = json!({
            "issue": {
                "project_id": project_id,
                "subject": subject,
                "description": args.description.clone().unwrap_or_default(),
            }
        });
        Ok(self.source.post("issues.json", &body)?)
    }

    /// A `description` update is appended to the current description.
    fn update_issue(&self, args: &IssueToolArgs) -> Result<Value, ToolError> {
        let issue_id = require_issue_id(args)?;
        let mut updates = match &args.updates {
            Some(updates) if !updates.is_empty() => updates.clone(),
            _ => {
                return Err(ToolError::Validation(
                    "No fields to update provided".to_string(),
                ));
            }
        };

        let path = issue_path(issue_id);
        if let Some(addition) = updates.get("description").cloned() {
            let addition = addition
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| addition.to_string());
            let current = self.source.get(&path, &QueryParams::new())?;
            let existing = current["issue"]["description"].as_str().unwrap_or_default();
            updates.insert(
                "description".to_string(),
                Value::String(format!("{existing}\n{addition}")),
            );
        }

        let response = self.source.put(&path, &json!({ "issue": updates }))?;
        Ok(match response {
            Value::Null => json!({ "issue_id": issue_id, "updated": true }),
            other => other,
        })
    }
}

impl Tool for IssueTool {
    fn name(&self) -> &'static str {
        "redmine_issue_tool"
    }

    fn description(&self) -> &'static str {
        "List Redmine projects, list issues for a project or globally, fetch a single issue, \
         create an issue in a project and update existing issues."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": [
                        "list_projects",
                        "list_issues",
                        "get_issue",
                        "create_issue",
                        "update_issue"
                    ]
                },
                "project_id": {"type": ["string", "integer"]},
                "issue_id": {"type": "integer"},
                "status_id": {"type": ["string", "integer"]},
                "subject": {"type": "string"},
                "description": {"type": "string"},
                "updates": {"type": "object"},
                "limit": {"type": "integer", "minimum": 1},
                "offset": {"type": "integer", "minimum": 0}
            },
            "required": ["action"]
        })
    }

    fn run(&self, arguments: &Value) -> Result<Value, ToolError> {
        let args: IssueToolArgs = parse_arguments(arguments)?;
        let action = args
            .action
            .ok_or_else(|| ToolError::Validation("action is required".to_string()))?;

        match action {
            IssueAction::ListProjects => self.list_projects(&args),
            IssueAction::ListIssues => self.list_issues(&args),
            IssueAction::GetIssue => self.get_issue(&args),
            IssueAction::CreateIssue => self.create_issue(&args),
            IssueAction::UpdateIssue => self.update_issue(&args),
        }
    }
}

fn paging(args: &IssueToolArgs) -> QueryParams {
    let mut query = QueryParams::new();
    if let Some(limit) = args.limit {
        query.push(("limit", limit.to_string()));
    }
    if let Some(offset) = args.offset {
        query.push(("offset", offset.to_string()));
    }
    query
}

fn require_issue_id(args: &IssueToolArgs) -> Result<u64, ToolError> {
    let text = id_text(args.issue_id.as_ref())
        .ok_or_else(|| ToolError::Validation("Missing issue_id".to_string()))?;
    text.parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            ToolError::Validation(format!("issue_id must be a positive integer, got {text}"))
        })
}

fn issue_path(issue_id: u64) -> String {
    format!("issues/{issue_id}.json")
}
