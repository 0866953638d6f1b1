use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::services::data_source::DataSource;
use crate::tools::dashboard_tool::DashboardTool;
use crate::tools::issue_tool::IssueTool;
use crate::tools::{Tool, ToolError, ToolResponse};

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The tools this crate registers with the host, sharing one data source.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(source: Rc<dyn DataSource>, page_size: u32) -> Self {
        Self {
            tools: vec![
                Box::new(IssueTool::new(source.clone())),
                Box::new(DashboardTool::new(source).with_page_size(page_size)),
            ],
        }
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name(),
                description: tool.description(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub fn execute(&self, name: &str, arguments: &Value) -> ToolResponse {
        match self.find(name) {
            Some(tool) => tool.execute(arguments),
            None => ToolResponse::failure(&ToolError::Validation(format!("unknown tool: {name}"))),
        }
    }
}
