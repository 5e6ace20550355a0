pub mod date_window;
pub mod github_api;
pub mod markdown;
pub mod query;
