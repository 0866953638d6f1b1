use std::rc::Rc;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::dashboard::generate_dashboard;
use crate::services::data_source::DataSource;
use crate::services::issue_fetcher::DEFAULT_PAGE_SIZE;
use crate::services::report_model::{ReportOptions, Theme};
use crate::tools::{parse_arguments, Tool, ToolError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DashboardArgs {
    project_name: Option<String>,
    theme: Option<Theme>,
    show_tables: Option<bool>,
    page_size: Option<u32>,
}

/// Renders the per-assignee HTML dashboard for a project looked up by name.
pub struct DashboardTool {
    source: Rc<dyn DataSource>,
    page_size: u32,
    clock: fn() -> NaiveDateTime,
}

impl DashboardTool {
    pub fn new(source: Rc<dyn DataSource>) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            clock: local_now,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[cfg(test)]
impl DashboardTool {
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Tool for DashboardTool {
    fn name(&self) -> &'static str {
        "redmine_dashboard_tool"
    }

    fn description(&self) -> &'static str {
        "Generate a summarized Redmine issue report with a visual per-assignee dashboard \
         for the project with the given name."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_name": {"type": "string", "description": "Redmine project name"},
                "theme": {"type": "string", "enum": ["dark", "light"]},
                "show_tables": {"type": "boolean", "description": "Include per-issue tables"},
                "page_size": {"type": "integer", "minimum": 1}
            },
            "required": ["project_name"]
        })
    }

    fn run(&self, arguments: &Value) -> Result<Value, ToolError> {
        let args: DashboardArgs = parse_arguments(arguments)?;
        let project_name = args
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ToolError::Validation("project_name is required".to_string()))?;

        let defaults = ReportOptions::default();
        let options = ReportOptions {
            theme: args.theme.unwrap_or(defaults.theme),
            show_tables: args.show_tables.unwrap_or(defaults.show_tables),
        };
        let page_size = args.page_size.unwrap_or(self.page_size).max(1);

        let dashboard = generate_dashboard(
            self.source.as_ref(),
            project_name,
            page_size,
            options,
            (self.clock)(),
        )?;
        Ok(Value::String(dashboard.html))
    }
}
