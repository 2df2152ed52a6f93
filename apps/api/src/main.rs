mod analysis;
mod auth;
mod config;
mod errors;
mod job_search;
mod models;
mod routes;
mod state;
mod trends;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::catalog::Catalog;
use crate::analysis::pipeline::Analyzer;
use crate::auth::store::UserStore;
use crate::config::Config;
use crate::job_search::SerpApiJobSearch;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Gap API v{}", env!("CARGO_PKG_VERSION"));

    // Reference data and compiled skill patterns
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    info!(
        "Catalog loaded: {} skills, {} job profiles",
        catalog.vocabulary().len(),
        catalog.jobs().len()
    );
    let analyzer = Arc::new(Analyzer::new(catalog)?);

    // Credential store
    let users = Arc::new(UserStore::open(&config.users_db_file)?);

    // Job search client
    if config.serpapi_api_key.is_none() {
        warn!("SERPAPI_API_KEY is not set; trending skills will be empty");
    }
    let job_search = Arc::new(SerpApiJobSearch::new(
        config.job_search_url.clone(),
        config.serpapi_api_key.clone(),
        Duration::from_secs(config.job_search_timeout_secs),
    )?);

    let state = AppState {
        config: config.clone(),
        analyzer,
        users,
        job_search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
