use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::issue::Issue;
use crate::domain::project::Project;
use crate::services::data_source::{DataSource, DataSourceError, QueryParams};
use crate::services::redmine_api::{IssueRecord, ProjectRecord};

pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Looks a project up by name (case-insensitive), numeric id or identifier.
pub fn resolve_project(
    source: &dyn DataSource,
    query: &str,
    page_size: u32,
) -> Result<Option<Project>, DataSourceError> {
    let projects: Vec<ProjectRecord> =
        collect_pages(source, "projects.json", "projects", &[], page_size)?;
    let projects: Vec<Project> = projects.into_iter().map(Project::from).collect();

    let by_name = projects
        .iter()
        .position(|project| project.name.to_lowercase() == query.trim().to_lowercase());
    let index = by_name.or_else(|| projects.iter().position(|project| project.matches(query)));
    Ok(index.map(|index| projects[index].clone()))
}

pub fn fetch_all_issues(
    source: &dyn DataSource,
    project_id: u64,
    page_size: u32,
) -> Result<Vec<Issue>, DataSourceError> {
    let filters = [("project_id", project_id.to_string())];
    let records: Vec<IssueRecord> =
        collect_pages(source, "issues.json", "issues", &filters, page_size)?;
    Ok(records.into_iter().map(Issue::from).collect())
}

/// Requests consecutive `limit`/`offset` pages. The offset advances by the
/// number of records actually received, so a server that caps `limit` below
/// the requested size is paged through rather than cut short. Paging stops on
/// an empty page, on a page shorter than the effective limit, or once the
/// offset reaches `total_count`. A missing `total_count` counts as zero, so
/// the loop always terminates.
fn collect_pages<T: DeserializeOwned>(
    source: &dyn DataSource,
    path: &str,
    key: &str,
    filters: &[(&'static str, String)],
    page_size: u32,
) -> Result<Vec<T>, DataSourceError> {
    let mut limit = u64::from(page_size.max(1));
    let mut offset: u64 = 0;
    let mut items = Vec::new();

    loop {
        let mut query: QueryParams = filters.to_vec();
        query.push(("limit", limit.to_string()));
        query.push(("offset", offset.to_string()));

        let mut payload = source.get(path, &query)?;
        let page = take_array(&mut payload, key)?;
        let received = page.len() as u64;
        for item in page {
            let record = serde_json::from_value(item)
                .map_err(|err| DataSourceError::Parse(format!("invalid {key} entry: {err}")))?;
            items.push(record);
        }

        let total = payload
            .get("total_count")
            .and_then(|value| value.as_u64())
            .unwrap_or(0);
        if let Some(served) = effective_limit(&payload, limit) {
            limit = served;
        }
        log::debug!("{path}: offset {offset}, received {received}, total_count {total}");

        offset = offset.saturating_add(received);
        if received == 0 || received < limit || offset >= total {
            break;
        }
    }

    Ok(items)
}

/// The page size the server actually applied, when it echoes a smaller
/// `limit` than the one requested.
fn effective_limit(payload: &Value, requested: u64) -> Option<u64> {
    payload
        .get("limit")
        .and_then(|value| value.as_u64())
        .filter(|served| *served > 0 && *served < requested)
}

fn take_array(payload: &mut Value, key: &str) -> Result<Vec<Value>, DataSourceError> {
    match payload.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(DataSourceError::Parse(format!("response has no `{key}` array"))),
    }
}
