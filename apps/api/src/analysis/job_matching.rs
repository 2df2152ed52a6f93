//! Job Matcher — ranks job profiles by the share of their required skills a candidate has.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{JobProfile, SkillSet};

/// How well a skill set covers one job profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub title: String,
    /// 0–100, rounded to two decimals.
    pub match_percentage: f64,
    pub matching_skills: SkillSet,
}

/// Scores every profile with a non-empty requirement set, best match first.
///
/// Ties keep the catalog's declaration order.
pub fn match_jobs(skills: &SkillSet, jobs: &[JobProfile]) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .iter()
        .filter(|job| !job.required_skills.is_empty())
        .map(|job| {
            let matching_skills: SkillSet = job
                .required_skills
                .intersection(skills)
                .cloned()
                .collect();
            let ratio = matching_skills.len() as f64 / job.required_skills.len() as f64;
            JobMatch {
                title: job.title.clone(),
                match_percentage: round2(ratio * 100.0),
                matching_skills,
            }
        })
        .collect();

    // Stable sort keeps catalog order among equal percentages.
    matches.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    matches
}

/// Rounds to two decimals, ties to even on the exact binary value.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
