//! Resume analysis pipeline: skills → job matches → gaps → course recommendations.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::analysis::catalog::{Catalog, SkillSet};
use crate::analysis::gaps::{skill_gaps, GapTarget};
use crate::analysis::job_matching::{match_jobs, JobMatch};
use crate::analysis::recommendations::{recommend_courses, Recommendation};
use crate::analysis::skills::SkillMatcher;

/// Catalog plus its compiled matcher. Built once, shared by every request.
#[derive(Debug, Clone)]
pub struct Analyzer {
    catalog: Catalog,
    matcher: SkillMatcher,
}

/// Result of analysing one resume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub skills: SkillSet,
    pub job_matches: Vec<JobMatch>,
    pub skill_gaps: SkillSet,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description_skills: Option<SkillSet>,
}

impl Analyzer {
    pub fn new(catalog: Catalog) -> Result<Self> {
        let matcher = SkillMatcher::new(catalog.vocabulary())?;
        Ok(Self { catalog, matcher })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.matcher.extract(text)
    }

    /// Runs the full pipeline on extracted resume text.
    ///
    /// When job description text is given, its skills become the gap target and
    /// `target` is ignored.
    pub fn analyze(
        &self,
        resume_text: &str,
        job_description_text: Option<&str>,
        target: GapTarget,
    ) -> AnalysisReport {
        let skills = self.extract_skills(resume_text);
        let job_description_skills = job_description_text.map(|t| self.extract_skills(t));
        let job_matches = match_jobs(&skills, self.catalog.jobs());

        let target = match &job_description_skills {
            Some(jd_skills) => GapTarget::Skills(jd_skills.clone()),
            None => target,
        };
        let target_skills = target.resolve(&self.catalog, &job_matches);
        let skill_gaps = skill_gaps(&skills, &target_skills);
        let recommendations = recommend_courses(&skill_gaps, &self.catalog);

        debug!(
            "Analysis: {} skills, {} job matches, {} gaps, {} recommendations",
            skills.len(),
            job_matches.len(),
            skill_gaps.len(),
            recommendations.len()
        );

        AnalysisReport {
            skills,
            job_matches,
            skill_gaps,
            recommendations,
            job_description_skills,
        }
    }
}
