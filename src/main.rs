mod commands;
mod domain;
mod services;
mod tools;
#[cfg(test)]
mod test_support;

use std::io;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::call_tool_cmd::{call_tool_command, list_tools_command};
use crate::commands::report_cmd::report_command;
use clap::{CommandFactory, Parser};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args = CliArgs::parse();
    match args.command {
        Commands::Tools => list_tools_command(),
        cmd @ Commands::Call { .. } => call_tool_command(cmd),
        cmd @ Commands::Report { .. } => report_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        }
    }
}
