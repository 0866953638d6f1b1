use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::services::report_model::Theme;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the registered tools with their input schemas as JSON
    Tools,
    /// Invoke a tool with a JSON argument object and print the response envelope
    Call {
        /// Tool name, e.g. redmine_issue_tool
        tool: String,
        /// JSON argument object
        #[arg(short, long, default_value = "{}")]
        args: String,
        /// Optional path to a Redmine config YAML
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Render the per-assignee dashboard of a project into an HTML file
    Report {
        /// Project name (case-insensitive), id or identifier
        #[arg(short, long)]
        project_name: String,
        /// Output HTML file
        #[arg(short, long)]
        output: String,
        /// Optional path to a Redmine config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Color scheme of the dashboard
        #[arg(short, long, value_enum, default_value_t = Theme::Dark)]
        theme: Theme,
        /// Issues requested per page
        #[arg(long)]
        page_size: Option<u32>,
        /// Leave out the per-issue tables
        #[arg(long)]
        no_tables: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
