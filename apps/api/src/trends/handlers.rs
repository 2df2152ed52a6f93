//! Axum route handlers for the Trends API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::trends::{build_trend_report, TrendReport};

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub query: Option<String>,
    pub location: Option<String>,
}

/// GET /api/trending-skills
///
/// Never fails: a broken listing fetch produces an all-zero report.
pub async fn handle_trending_skills(
    State(state): State<AppState>,
    Query(params): Query<TrendQuery>,
) -> Json<TrendReport> {
    let query = non_blank(params.query).unwrap_or_else(|| state.config.trend_query.clone());
    let location =
        non_blank(params.location).unwrap_or_else(|| state.config.trend_location.clone());

    let report = build_trend_report(
        state.job_search.as_ref(),
        &state.analyzer,
        &query,
        &location,
    )
    .await;
    Json(report)
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
