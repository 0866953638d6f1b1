use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::project::Project;
use crate::domain::summary::Overview;
use crate::services::aggregation::{group_by_assignee, overview, summarize};
use crate::services::data_source::{DataSource, DataSourceError};
use crate::services::issue_fetcher::{fetch_all_issues, resolve_project};
use crate::services::report_model::ReportOptions;
use crate::services::report_renderer::{render, ReportError};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),
    #[error(transparent)]
    Fetch(#[from] DataSourceError),
    #[error(transparent)]
    Render(#[from] ReportError),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub project: Project,
    pub overview: Overview,
    pub html: String,
}

/// Resolves the project, fetches every issue, groups them by assignee and
/// renders the HTML dashboard. Any failure aborts the whole report.
pub fn generate_dashboard(
    source: &dyn DataSource,
    project_name: &str,
    page_size: u32,
    options: ReportOptions,
    now: NaiveDateTime,
) -> Result<Dashboard, DashboardError> {
    let project = resolve_project(source, project_name, page_size)?
        .ok_or_else(|| DashboardError::ProjectNotFound(project_name.to_string()))?;

    let issues = fetch_all_issues(source, project.id, page_size)?;
    let summary = summarize(&issues);
    let groups = group_by_assignee(issues);
    let overview = overview(&summary, &groups);

    let html = render(&project.name, &groups, &summary, options, now)?;
    log::info!(
        "rendered dashboard for '{}' ({} issues, {} assignees)",
        project.name,
        overview.total_issues,
        overview.unique_assignees
    );

    Ok(Dashboard {
        project,
        overview,
        html,
    })
}
