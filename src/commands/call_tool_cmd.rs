use serde_json::Value;

use crate::commands::base_commands::Commands;
use crate::commands::tool_host::build_registry;
use crate::tools::{ToolError, ToolResponse};

pub fn call_tool_command(cmd: Commands) {
    if let Commands::Call { tool, args, config } = cmd {
        let response = match serde_json::from_str::<Value>(&args) {
            Ok(arguments) => build_registry(config.as_deref()).execute(&tool, &arguments),
            Err(e) => ToolResponse::failure(&ToolError::Validation(format!(
                "arguments are not valid JSON: {e}"
            ))),
        };

        match serde_json::to_string_pretty(&response) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Failed to serialize tool response: {e:?}"),
        }
    }
}

pub fn list_tools_command() {
    let registry = build_registry(None);
    match serde_json::to_string_pretty(&registry.descriptors()) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize tool descriptors: {e:?}"),
    }
}
