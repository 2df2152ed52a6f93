//! Static reference data: the skill vocabulary, job profiles and course table.
//!
//! Loaded once at startup (built-in or from `CATALOG_PATH`) and shared read-only.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A set of canonical lowercase skill names.
pub type SkillSet = BTreeSet<String>;

const BUILTIN_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "react",
    "node.js",
    "sql",
    "mongodb",
    "data analysis",
    "machine learning",
    "aws",
    "docker",
    "communication",
    "cloud computing",
];

const BUILTIN_JOBS: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &["python", "javascript", "react", "node.js", "sql"],
    ),
    (
        "Data Scientist",
        &["python", "data analysis", "machine learning", "sql"],
    ),
    ("DevOps Engineer", &["aws", "docker", "python", "node.js"]),
];

const BUILTIN_COURSES: &[(&str, &str)] = &[
    ("sql", "SQL for Data Science (Coursera)"),
    ("cloud computing", "AWS Certified Solutions Architect (Udemy)"),
    ("communication", "Effective Communication (LinkedIn Learning)"),
    ("python", "Complete Python Bootcamp (Udemy)"),
    ("react", "Modern React with Redux (Udemy)"),
];

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Skill vocabulary is empty")]
    EmptyVocabulary,

    #[error("Job '{job}' requires '{skill}', which is not in the skill vocabulary")]
    UnknownRequiredSkill { job: String, skill: String },

    #[error("Course entry '{0}' is not in the skill vocabulary")]
    UnknownCourseSkill(String),

    #[error("Job title '{0}' appears more than once")]
    DuplicateJob(String),

    #[error("Invalid catalog JSON: {0}")]
    Parse(String),
}

/// A named role and the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfile {
    pub title: String,
    pub required_skills: SkillSet,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<String>,
    #[serde(default)]
    jobs: Vec<JobProfile>,
    #[serde(default)]
    courses: BTreeMap<String, String>,
}

/// Immutable reference data for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct Catalog {
    vocabulary: Vec<String>,
    jobs: Vec<JobProfile>,
    courses: BTreeMap<String, String>,
}

impl Catalog {
    /// Normalizes names to lowercase and checks that every job requirement and
    /// course key refers to a vocabulary entry.
    pub fn new(
        skills: Vec<String>,
        jobs: Vec<JobProfile>,
        courses: BTreeMap<String, String>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let vocabulary: Vec<String> = skills
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        if vocabulary.is_empty() {
            return Err(CatalogError::EmptyVocabulary);
        }

        let mut titles = HashSet::new();
        let mut normalized_jobs = Vec::with_capacity(jobs.len());
        for job in jobs {
            if !titles.insert(job.title.clone()) {
                return Err(CatalogError::DuplicateJob(job.title));
            }
            let required_skills: SkillSet = job
                .required_skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect();
            if let Some(skill) = required_skills.iter().find(|s| !seen.contains(*s)) {
                return Err(CatalogError::UnknownRequiredSkill {
                    job: job.title,
                    skill: skill.clone(),
                });
            }
            normalized_jobs.push(JobProfile {
                title: job.title,
                required_skills,
            });
        }

        let mut normalized_courses = BTreeMap::new();
        for (skill, course) in courses {
            let skill = skill.trim().to_lowercase();
            if !seen.contains(&skill) {
                return Err(CatalogError::UnknownCourseSkill(skill));
            }
            normalized_courses.insert(skill, course);
        }

        Ok(Self {
            vocabulary,
            jobs: normalized_jobs,
            courses: normalized_courses,
        })
    }

    /// The catalog shipped with the service.
    pub fn builtin() -> Self {
        let skills = BUILTIN_SKILLS.iter().map(|s| s.to_string()).collect();
        let jobs = BUILTIN_JOBS
            .iter()
            .map(|(title, required)| JobProfile {
                title: title.to_string(),
                required_skills: required.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        let courses = BUILTIN_COURSES
            .iter()
            .map(|(skill, course)| (skill.to_string(), course.to_string()))
            .collect();

        Self::new(skills, jobs, courses)
            .unwrap_or_else(|e| unreachable!("built-in catalog is invalid: {e}"))
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.skills, file.jobs, file.courses)
    }

    /// Reads a catalog file, or returns the built-in catalog when no path is set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Catalog file {} is invalid", path.display()))
    }

    /// Vocabulary in declaration order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Job profiles in declaration order.
    pub fn jobs(&self) -> &[JobProfile] {
        &self.jobs
    }

    pub fn job(&self, title: &str) -> Option<&JobProfile> {
        self.jobs.iter().find(|j| j.title == title)
    }

    pub fn course_for(&self, skill: &str) -> Option<&str> {
        self.courses.get(skill).map(String::as_str)
    }
}
