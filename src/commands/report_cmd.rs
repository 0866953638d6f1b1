use chrono::Local;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_dashboard_summary;
use crate::services::dashboard::generate_dashboard;
use crate::services::redmine_api::{RedmineApiClient, RedmineConfig};
use crate::services::report_model::ReportOptions;

pub fn report_command(cmd: Commands) {
    if let Commands::Report {
        project_name,
        output,
        config,
        theme,
        page_size,
        no_tables,
    } = cmd
    {
        let redmine_config = match RedmineConfig::load(config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load Redmine config: {e}");
                return;
            }
        };
        let page_size = page_size.unwrap_or(redmine_config.page_size);

        let api_client = match RedmineApiClient::new(redmine_config) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Failed to create RedmineApiClient: {e}");
                return;
            }
        };

        let options = ReportOptions {
            theme,
            show_tables: !no_tables,
        };
        let dashboard = match generate_dashboard(
            &api_client,
            &project_name,
            page_size,
            options,
            Local::now().naive_local(),
        ) {
            Ok(dashboard) => dashboard,
            Err(e) => {
                eprintln!("Failed to generate dashboard: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, &dashboard.html) {
            eprintln!("Failed to write output file: {e:?}");
        } else {
            println!("{}", format_dashboard_summary(&dashboard, &output));
        }
    }
}
