use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::issue::Issue;
use crate::domain::summary::{CategoryCounts, Overview};
use crate::services::aggregation::{summarize, AssigneeGroup};

pub const CHART_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub theme: Theme,
    pub show_tables: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            show_tables: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub heading: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub table_background: &'static str,
    pub table_header: &'static str,
    pub table_header_text: &'static str,
    pub grid: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: "#000000",
                surface: "rgba(30, 30, 45, 0.7)",
                border: "rgba(255, 255, 255, 0.1)",
                heading: "#c43b9d",
                text: "#ffffff",
                muted: "rgba(255, 255, 255, 0.7)",
                table_background: "#ffffff",
                table_header: "#000000",
                table_header_text: "#ffffff",
                grid: "rgba(255, 255, 255, 0.1)",
            },
            Theme::Light => Self {
                background: "#f4f6fb",
                surface: "#ffffff",
                border: "#d9dde8",
                heading: "#3742fa",
                text: "#1e1e2d",
                muted: "#5f6577",
                table_background: "#ffffff",
                table_header: "#2d2d3d",
                table_header_text: "#ffffff",
                grid: "rgba(0, 0, 0, 0.08)",
            },
        }
    }
}

/// Chart.js configuration for one distribution.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<usize>,
    pub background_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub canvas_id: String,
    pub title: String,
    pub spec: ChartSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueRow {
    pub id: u64,
    pub subject: String,
    pub status: String,
    pub status_color: String,
    pub priority: String,
    pub priority_color: String,
    pub tracker: String,
    pub created: String,
    pub due: String,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssigneeSection {
    pub dom_id: String,
    pub assignee: String,
    pub issue_count: usize,
    pub charts: Vec<ChartView>,
    pub rows: Vec<IssueRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    pub project_name: String,
    pub generated_at: String,
    pub chart_library_url: &'static str,
    pub palette: Palette,
    pub show_tables: bool,
    pub overview: Overview,
    pub sections: Vec<AssigneeSection>,
}

/// Evenly spaced hues, so every category of a set gets its own stable color.
pub fn category_colors(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| {
            let hue = index * 360 / count.max(1);
            format!("hsl({hue}, 65%, 55%)")
        })
        .collect()
}

/// Lowercase ASCII slug prefixed with the section index, unique per report.
pub fn section_dom_id(index: usize, assignee: &str) -> String {
    let mut slug = String::new();
    for ch in assignee.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("assignee-{index}")
    } else {
        format!("assignee-{index}-{slug}")
    }
}

pub fn build_report_model(
    project_name: &str,
    groups: &[AssigneeGroup],
    overview: Overview,
    options: ReportOptions,
    now: NaiveDateTime,
) -> ReportModel {
    let palette = Palette::for_theme(options.theme);
    let today = now.date();
    let sections = groups
        .iter()
        .enumerate()
        .map(|(index, group)| build_section(index, group, &palette, today))
        .collect();

    ReportModel {
        project_name: project_name.to_string(),
        generated_at: now.format("%Y-%m-%d %H:%M").to_string(),
        chart_library_url: CHART_LIBRARY_URL,
        palette,
        show_tables: options.show_tables,
        overview,
        sections,
    }
}

fn build_section(
    index: usize,
    group: &AssigneeGroup,
    palette: &Palette,
    today: chrono::NaiveDate,
) -> AssigneeSection {
    let dom_id = section_dom_id(index, &group.assignee);
    let summary = summarize(&group.issues);

    let charts = vec![
        chart_view(
            &dom_id,
            "status",
            "Status Distribution",
            "doughnut",
            &summary.by_status,
            palette,
        ),
        chart_view(
            &dom_id,
            "priority",
            "Priority Distribution",
            "bar",
            &summary.by_priority,
            palette,
        ),
        chart_view(
            &dom_id,
            "tracker",
            "Tracker Distribution",
            "pie",
            &summary.by_tracker,
            palette,
        ),
    ];

    let rows = group
        .issues
        .iter()
        .map(|issue| issue_row(issue, &summary.by_status, &summary.by_priority, today))
        .collect();

    AssigneeSection {
        dom_id,
        assignee: group.assignee.clone(),
        issue_count: group.issues.len(),
        charts,
        rows,
    }
}

fn chart_view(
    dom_id: &str,
    field: &str,
    title: &str,
    kind: &'static str,
    counts: &CategoryCounts,
    palette: &Palette,
) -> ChartView {
    let spec = ChartSpec {
        kind,
        data: ChartData {
            labels: counts.labels(),
            datasets: vec![ChartDataset {
                label: title.to_string(),
                data: counts.values(),
                background_color: category_colors(counts.category_count()),
                border_width: 1,
            }],
        },
        options: chart_options(kind, title, palette),
    };

    ChartView {
        canvas_id: format!("{dom_id}-{field}-chart"),
        title: title.to_string(),
        spec,
    }
}

fn chart_options(kind: &str, title: &str, palette: &Palette) -> Value {
    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": {
                "display": kind != "bar",
                "position": "right",
                "labels": { "color": palette.text }
            },
            "title": {
                "display": true,
                "text": title,
                "color": palette.text,
                "font": { "size": 14 }
            }
        }
    });
    if kind == "bar" {
        options["scales"] = json!({
            "x": { "grid": { "color": palette.grid }, "ticks": { "color": palette.text } },
            "y": {
                "grid": { "color": palette.grid },
                "ticks": { "color": palette.text, "precision": 0 },
                "beginAtZero": true
            }
        });
    } else if kind == "doughnut" {
        options["cutout"] = json!("65%");
    }
    options
}

fn issue_row(
    issue: &Issue,
    statuses: &CategoryCounts,
    priorities: &CategoryCounts,
    today: chrono::NaiveDate,
) -> IssueRow {
    IssueRow {
        id: issue.id,
        subject: issue.subject.clone(),
        status: issue.status_name().to_string(),
        status_color: color_of(statuses, issue.status_name()),
        priority: issue.priority_name().to_string(),
        priority_color: color_of(priorities, issue.priority_name()),
        tracker: issue.tracker_name().to_string(),
        created: issue
            .created_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        due: issue
            .due_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        overdue: issue.is_overdue(today),
    }
}

fn color_of(counts: &CategoryCounts, label: &str) -> String {
    let colors = category_colors(counts.category_count());
    counts
        .position(label)
        .and_then(|index| colors.get(index).cloned())
        .unwrap_or_else(|| "transparent".to_string())
}
