use std::rc::Rc;

use crate::services::data_source::{DataSource, UnconfiguredSource};
use crate::services::issue_fetcher::DEFAULT_PAGE_SIZE;
use crate::services::redmine_api::{RedmineApiClient, RedmineConfig};
use crate::tools::registry::ToolRegistry;

/// Builds the registry the host would load. A broken configuration does not
/// prevent listing or argument validation; it surfaces on the first request.
pub fn build_registry(config_path: Option<&str>) -> ToolRegistry {
    let (source, page_size): (Rc<dyn DataSource>, u32) = match RedmineConfig::load(config_path) {
        Ok(config) => {
            let page_size = config.page_size;
            match RedmineApiClient::new(config) {
                Ok(client) => (Rc::new(client), page_size),
                Err(e) => {
                    log::warn!("Redmine client unavailable: {e}");
                    (Rc::new(UnconfiguredSource::new(e.to_string())), page_size)
                }
            }
        }
        Err(e) => {
            log::warn!("Failed to load Redmine config: {e}");
            (Rc::new(UnconfiguredSource::new(e.to_string())), DEFAULT_PAGE_SIZE)
        }
    };
    ToolRegistry::new(source, page_size)
}
