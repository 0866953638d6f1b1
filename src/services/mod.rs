pub mod aggregation;
pub mod dashboard;
pub mod data_source;
pub mod issue_fetcher;
pub mod redmine_api;
pub mod report_model;
pub mod report_renderer;
