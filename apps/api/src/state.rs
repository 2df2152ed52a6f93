use std::sync::Arc;

use crate::analysis::pipeline::Analyzer;
use crate::auth::store::UserStore;
use crate::config::Config;
use crate::job_search::JobSearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Catalog and compiled skill patterns, read-only after startup.
    pub analyzer: Arc<Analyzer>,
    pub users: Arc<UserStore>,
    /// Pluggable listing source. Default: SerpApiJobSearch.
    pub job_search: Arc<dyn JobSearch>,
}
