//! Job Search — live job listings for trend analysis.
//!
//! Best-effort by contract: any failure (missing key, network error, non-2xx,
//! malformed body) is logged and yields an empty listing set. Callers never see
//! an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// A single job posting as returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub posted_at: Option<String>,
    pub description: String,
    pub apply_link: Option<String>,
}

/// Source of job listings. Carried in `AppState` as `Arc<dyn JobSearch>`.
#[async_trait]
pub trait JobSearch: Send + Sync {
    /// Returns listings for `query` near `location`, or an empty set on failure.
    async fn search(&self, query: &str, location: &str) -> Vec<JobListing>;
}

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No job search API key configured")]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    jobs_results: Vec<SerpApiJob>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiJob {
    #[serde(default)]
    title: String,
    company_name: Option<String>,
    location: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    detected_extensions: DetectedExtensions,
    #[serde(default)]
    apply_options: Vec<ApplyOption>,
    share_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectedExtensions {
    posted_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApplyOption {
    link: String,
}

impl From<SerpApiJob> for JobListing {
    fn from(job: SerpApiJob) -> Self {
        let apply_link = job
            .apply_options
            .into_iter()
            .next()
            .map(|o| o.link)
            .or(job.share_link);
        JobListing {
            title: job.title,
            company: job.company_name,
            location: job.location,
            posted_at: job.detected_extensions.posted_at,
            description: job.description,
            apply_link,
        }
    }
}

/// SerpApi Google Jobs client.
#[derive(Clone)]
pub struct SerpApiJobSearch {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerpApiJobSearch {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, JobSearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Single request, no retries.
    pub async fn fetch(&self, query: &str, location: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let api_key = self.api_key.as_deref().ok_or(JobSearchError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google_jobs"),
                ("q", query),
                ("location", location),
                ("api_key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SerpApiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(JobSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SerpApiResponse = response.json().await?;
        if let Some(message) = body.error {
            // SerpApi reports "no results" and quota problems in a 200 body.
            return Err(JobSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.jobs_results.into_iter().map(JobListing::from).collect())
    }
}

#[async_trait]
impl JobSearch for SerpApiJobSearch {
    async fn search(&self, query: &str, location: &str) -> Vec<JobListing> {
        match self.fetch(query, location).await {
            Ok(listings) => {
                debug!("Job search for '{query}' in '{location}' returned {} listings", listings.len());
                listings
            }
            Err(e) => {
                warn!("Job search for '{query}' in '{location}' failed: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer, api_key: Option<&str>) -> SerpApiJobSearch {
        SerpApiJobSearch::new(
            server.url("/search.json"),
            api_key.map(String::from),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_listings() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search.json")
                    .query_param("engine", "google_jobs")
                    .query_param("q", "Data Engineer")
                    .query_param("location", "Berlin")
                    .query_param("api_key", "secret");
                then.status(200).json_body(json!({
                    "jobs_results": [
                        {
                            "title": "Data Engineer",
                            "company_name": "Acme",
                            "location": "Berlin, Germany",
                            "description": "Python and SQL pipelines on AWS.",
                            "detected_extensions": {"posted_at": "3 days ago"},
                            "apply_options": [{"title": "Acme Careers", "link": "https://acme.example/apply"}]
                        },
                        {
                            "title": "Analytics Engineer",
                            "description": "dbt and SQL.",
                            "share_link": "https://jobs.example/share"
                        }
                    ]
                }));
            })
            .await;

        let listings = client(&server, Some("secret"))
            .search("Data Engineer", "Berlin")
            .await;

        mock.assert_async().await;
        assert_eq!(listings.len(), 2);
        assert_eq!(
            listings[0],
            JobListing {
                title: "Data Engineer".into(),
                company: Some("Acme".into()),
                location: Some("Berlin, Germany".into()),
                posted_at: Some("3 days ago".into()),
                description: "Python and SQL pipelines on AWS.".into(),
                apply_link: Some("https://acme.example/apply".into()),
            }
        );
        assert_eq!(listings[1].company, None);
        assert_eq!(
            listings[1].apply_link.as_deref(),
            Some("https://jobs.example/share")
        );
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search.json");
                then.status(500).body("upstream exploded");
            })
            .await;

        let search = client(&server, Some("secret"));
        assert!(search.search("Rust", "Remote").await.is_empty());

        let err = search.fetch("Rust", "Remote").await.unwrap_err();
        assert!(matches!(err, JobSearchError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_error_field_in_ok_body_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search.json");
                then.status(200)
                    .json_body(json!({"error": "Google hasn't returned any results for this query."}));
            })
            .await;

        let err = client(&server, Some("secret"))
            .fetch("Underwater Basket Weaver", "Mars")
            .await
            .unwrap_err();
        match err {
            JobSearchError::Api { message, .. } => assert!(message.contains("any results")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search.json");
                then.status(200).json_body(json!({"jobs_results": []}));
            })
            .await;

        let search = client(&server, None);
        assert!(search.search("Rust", "Remote").await.is_empty());
        assert!(matches!(
            search.fetch("Rust", "Remote").await,
            Err(JobSearchError::MissingApiKey)
        ));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_malformed_body_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search.json");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        assert!(client(&server, Some("secret"))
            .search("Rust", "Remote")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_empty() {
        let search = SerpApiJobSearch::new(
            "http://127.0.0.1:1/search.json".to_string(),
            Some("secret".to_string()),
            Duration::from_secs(2),
        )
        .unwrap();
        assert!(search.search("Rust", "Remote").await.is_empty());
    }
}
