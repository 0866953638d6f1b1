use crate::services::dashboard::Dashboard;

pub fn format_dashboard_summary(dashboard: &Dashboard, output: &str) -> String {
    let overview = &dashboard.overview;

    let mut lines = Vec::new();
    lines.push("Dashboard Report".to_string());
    lines.push(format!(
        "Project: {} (id {})",
        dashboard.project.name, dashboard.project.id
    ));
    lines.push(format!("Total issues: {}", overview.total_issues));
    lines.push(format!("High priority: {}", overview.high_priority));
    lines.push(format!("Normal priority: {}", overview.normal_priority));
    lines.push(format!("Assignees: {}", overview.unique_assignees));
    lines.push(format!("Dashboard written to {output}"));

    lines.join("\n")
}
