use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; a malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub users_db_file: PathBuf,
    /// Optional JSON catalog replacing the built-in skills/jobs/courses.
    pub catalog_path: Option<PathBuf>,
    /// SerpApi key. Trend analysis degrades to empty results without it.
    pub serpapi_api_key: Option<String>,
    pub job_search_url: String,
    pub job_search_timeout_secs: u64,
    pub trend_query: String,
    pub trend_location: String,
    pub include_trends: bool,
    /// Gap target used when the request names none. `None` means the union of
    /// every matched job's requirements.
    pub default_target_job: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            users_db_file: std::env::var("USERS_DB_FILE")
                .unwrap_or_else(|_| "users.json".to_string())
                .into(),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            serpapi_api_key: optional_env("SERPAPI_API_KEY"),
            job_search_url: std::env::var("JOB_SEARCH_URL")
                .unwrap_or_else(|_| "https://serpapi.com/search.json".to_string()),
            job_search_timeout_secs: parse_env("JOB_SEARCH_TIMEOUT_SECS", 15)?,
            trend_query: std::env::var("TREND_QUERY")
                .unwrap_or_else(|_| "Software Engineer".to_string()),
            trend_location: std::env::var("TREND_LOCATION")
                .unwrap_or_else(|_| "United States".to_string()),
            include_trends: parse_env("INCLUDE_TRENDS", false)?,
            default_target_job: match std::env::var("DEFAULT_TARGET_JOB") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => Some("Software Engineer".to_string()),
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

/// Returns the variable's value, treating unset and blank as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
