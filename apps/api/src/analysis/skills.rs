//! Skill Matcher — whole-word, case-insensitive lookup of vocabulary skills in text.

use anyhow::{Context, Result};
use regex::Regex;

use crate::analysis::catalog::SkillSet;

/// Vocabulary skills with their word-boundary patterns, compiled once at startup.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let patterns = vocabulary
            .iter()
            .map(|skill| {
                let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
                Regex::new(&pattern)
                    .with_context(|| format!("Failed to compile pattern for skill '{skill}'"))
                    .map(|re| (skill.clone(), re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns every vocabulary skill that occurs in `text` as a whole word.
    pub fn extract(&self, text: &str) -> SkillSet {
        let normalized = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(&normalized))
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}
