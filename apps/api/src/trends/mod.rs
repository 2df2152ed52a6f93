// Trend analysis: live job listings → trending vocabulary skills → courses.
// Listings come from job_search; a failed fetch yields an all-zero report.

pub mod extractor;
pub mod handlers;

use serde::Serialize;
use tracing::info;

use crate::analysis::pipeline::Analyzer;
use crate::analysis::recommendations::{recommend_courses, Recommendation};
use crate::job_search::{JobListing, JobSearch};
use crate::trends::extractor::{trending_skills, TrendingSkill};

/// Listings echoed back to the client as a sample.
const SAMPLE_LISTINGS: usize = 5;
/// Top trending skills considered for course suggestions.
const TOP_TRENDING: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub trending_skills: Vec<TrendingSkill>,
    pub current_jobs: Vec<JobListing>,
    pub trending_courses: Vec<Recommendation>,
}

pub async fn build_trend_report(
    search: &dyn JobSearch,
    analyzer: &Analyzer,
    query: &str,
    location: &str,
) -> TrendReport {
    let listings = search.search(query, location).await;
    info!(
        "Trend analysis for '{query}' in '{location}' over {} listings",
        listings.len()
    );

    let descriptions: Vec<&str> = listings.iter().map(|l| l.description.as_str()).collect();
    let trending = trending_skills(&descriptions, analyzer.catalog().vocabulary());

    let top_skills: Vec<&String> = trending
        .iter()
        .filter(|t| t.count > 0)
        .take(TOP_TRENDING)
        .map(|t| &t.skill)
        .collect();
    let trending_courses = recommend_courses(top_skills, analyzer.catalog());

    TrendReport {
        trending_skills: trending,
        current_jobs: listings.into_iter().take(SAMPLE_LISTINGS).collect(),
        trending_courses,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::job_search::{JobListing, JobSearch};

    /// Serves a fixed set of listings regardless of query.
    pub struct StaticJobSearch(pub Vec<JobListing>);

    #[async_trait]
    impl JobSearch for StaticJobSearch {
        async fn search(&self, _query: &str, _location: &str) -> Vec<JobListing> {
            self.0.clone()
        }
    }

    pub fn listing(title: &str, description: &str) -> JobListing {
        JobListing {
            title: title.to_string(),
            company: Some("Acme".to_string()),
            location: Some("Remote".to_string()),
            posted_at: None,
            description: description.to_string(),
            apply_link: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{listing, StaticJobSearch};
    use super::*;
    use crate::analysis::catalog::Catalog;

    fn analyzer() -> Analyzer {
        Analyzer::new(Catalog::builtin()).unwrap()
    }

    #[tokio::test]
    async fn test_report_from_listings() {
        let search = StaticJobSearch(
            (0..7)
                .map(|i| listing(&format!("Job {i}"), "Python and SQL, plus communication."))
                .collect(),
        );

        let report = build_trend_report(&search, &analyzer(), "Engineer", "Remote").await;

        assert_eq!(report.current_jobs.len(), SAMPLE_LISTINGS);
        assert_eq!(report.trending_skills[0].count, 7);
        let course_skills: Vec<&str> = report
            .trending_courses
            .iter()
            .map(|r| r.skill.as_str())
            .collect();
        assert_eq!(course_skills, vec!["python", "sql", "communication"]);
    }

    #[tokio::test]
    async fn test_failed_search_yields_zero_report() {
        let search = StaticJobSearch(vec![]);
        let report = build_trend_report(&search, &analyzer(), "Engineer", "Remote").await;

        assert!(report.current_jobs.is_empty());
        assert!(report.trending_courses.is_empty());
        assert_eq!(report.trending_skills.len(), 12);
        assert!(report.trending_skills.iter().all(|t| t.count == 0));
    }
}
