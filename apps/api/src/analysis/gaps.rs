//! Gap Analyzer — skills a target needs that the candidate lacks.

use crate::analysis::catalog::{Catalog, SkillSet};
use crate::analysis::job_matching::JobMatch;

/// What the candidate's skills are measured against.
#[derive(Debug, Clone, PartialEq)]
pub enum GapTarget {
    /// Requirements of a named job profile. Unknown names have no requirements.
    Job(String),
    /// An explicit skill set, e.g. skills found in an uploaded job description.
    Skills(SkillSet),
    /// Union of the requirements of every job with a non-zero match.
    MatchedJobs,
}

impl GapTarget {
    /// Resolves the target to the concrete skill set it stands for.
    pub fn resolve(&self, catalog: &Catalog, job_matches: &[JobMatch]) -> SkillSet {
        match self {
            GapTarget::Job(title) => catalog
                .job(title)
                .map(|job| job.required_skills.clone())
                .unwrap_or_default(),
            GapTarget::Skills(skills) => skills.clone(),
            GapTarget::MatchedJobs => job_matches
                .iter()
                .filter(|m| m.match_percentage > 0.0)
                .filter_map(|m| catalog.job(&m.title))
                .flat_map(|job| job.required_skills.iter().cloned())
                .collect(),
        }
    }
}

/// `target − user`.
pub fn skill_gaps(user: &SkillSet, target: &SkillSet) -> SkillSet {
    target.difference(user).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::job_matching::match_jobs;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_data_scientist_gap() {
        let catalog = Catalog::builtin();
        let user = set(&["python", "sql"]);
        let target = GapTarget::Job("Data Scientist".into()).resolve(&catalog, &[]);
        assert_eq!(
            skill_gaps(&user, &target),
            set(&["data analysis", "machine learning"])
        );
    }

    #[test]
    fn test_gap_partitions_requirements() {
        let catalog = Catalog::builtin();
        let user = set(&["python", "docker", "communication"]);
        for job in catalog.jobs() {
            let gaps = skill_gaps(&user, &job.required_skills);
            let held: SkillSet = user.intersection(&job.required_skills).cloned().collect();

            assert!(gaps.is_disjoint(&held));
            let union: SkillSet = gaps.union(&held).cloned().collect();
            assert_eq!(union, job.required_skills);
        }
    }

    #[test]
    fn test_unknown_job_has_no_gaps() {
        let catalog = Catalog::builtin();
        let target = GapTarget::Job("Astronaut".into()).resolve(&catalog, &[]);
        assert!(target.is_empty());
        assert!(skill_gaps(&set(&["python"]), &target).is_empty());
    }

    #[test]
    fn test_explicit_skill_target() {
        let catalog = Catalog::builtin();
        let target = GapTarget::Skills(set(&["aws", "react"])).resolve(&catalog, &[]);
        assert_eq!(skill_gaps(&set(&["react"]), &target), set(&["aws"]));
    }

    #[test]
    fn test_matched_jobs_union_ignores_zero_matches() {
        let catalog = Catalog::builtin();
        // "machine learning" only appears in Data Scientist, so only that job matches.
        let user = set(&["machine learning"]);
        let matches = match_jobs(&user, catalog.jobs());
        let target = GapTarget::MatchedJobs.resolve(&catalog, &matches);

        assert_eq!(
            target,
            set(&["python", "data analysis", "machine learning", "sql"])
        );
        assert_eq!(
            skill_gaps(&user, &target),
            set(&["python", "data analysis", "sql"])
        );
    }

    #[test]
    fn test_full_coverage_leaves_no_gap() {
        let target = set(&["aws", "docker"]);
        assert!(skill_gaps(&set(&["aws", "docker", "sql"]), &target).is_empty());
    }
}
