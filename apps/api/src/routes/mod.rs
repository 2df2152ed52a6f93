pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::auth::handlers as auth;
use crate::state::AppState;
use crate::trends::handlers as trends;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/signup", post(auth::handle_signup))
        .route("/api/login", post(auth::handle_login))
        // Analysis
        .route("/api/analyze-resume", post(analysis::handle_analyze_resume))
        .route("/api/trending-skills", get(trends::handle_trending_skills))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
