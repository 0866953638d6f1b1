use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::summary::Summary;
use crate::services::aggregation::{overview, AssigneeGroup};
use crate::services::report_model::{build_report_model, ReportModel, ReportOptions};

const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to render dashboard template: {0}")]
    Template(#[from] liquid::Error),
    #[error("failed to serialize chart data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders the dashboard for one project. Pure apart from `now`, which drives
/// the overdue flags and the generation timestamp.
pub fn render(
    project_name: &str,
    groups: &[AssigneeGroup],
    summary: &Summary,
    options: ReportOptions,
    now: NaiveDateTime,
) -> Result<String, ReportError> {
    let model = build_report_model(project_name, groups, overview(summary, groups), options, now);
    render_model(&model)
}

pub fn render_model(model: &ReportModel) -> Result<String, ReportError> {
    let mut context = serde_json::to_value(model)?;
    embed_chart_specs(model, &mut context)?;

    let template = liquid::ParserBuilder::with_stdlib()
        .build()?
        .parse(DASHBOARD_TEMPLATE)?;
    let globals = liquid::to_object(&context)?;
    Ok(template.render(&globals)?)
}

/// Replaces each chart's `spec` with its script-safe JSON text, serialized
/// from the typed spec so field order is preserved.
fn embed_chart_specs(model: &ReportModel, context: &mut Value) -> Result<(), ReportError> {
    for (section_index, section) in model.sections.iter().enumerate() {
        for (chart_index, chart) in section.charts.iter().enumerate() {
            let slot = &mut context["sections"][section_index]["charts"][chart_index];
            if let Some(object) = slot.as_object_mut() {
                object.remove("spec");
                object.insert(
                    "spec_json".to_string(),
                    Value::String(script_safe_json(&chart.spec)?),
                );
            }
        }
    }
    Ok(())
}

/// JSON that cannot terminate the surrounding `<script>` element.
pub fn script_safe_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let text = serde_json::to_string(value)?;
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    Ok(escaped)
}
