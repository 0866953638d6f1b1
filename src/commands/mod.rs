pub mod base_commands;
pub mod call_tool_cmd;
pub mod report_cmd;
pub mod report_format;
pub mod tool_host;
