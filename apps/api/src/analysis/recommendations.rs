//! Recommendation Mapper — one course per gap skill that has a catalog entry.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    pub course: String,
}

/// Skills without a course are dropped; there is no partial suggestion.
pub fn recommend_courses<'a, I>(skills: I, catalog: &Catalog) -> Vec<Recommendation>
where
    I: IntoIterator<Item = &'a String>,
{
    skills
        .into_iter()
        .filter_map(|skill| {
            catalog.course_for(skill).map(|course| Recommendation {
                skill: skill.clone(),
                course: course.to_string(),
            })
        })
        .collect()
}
