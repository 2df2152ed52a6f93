//! Trend Extractor — ranks vocabulary skills by how often they occur in job descriptions.
//!
//! Bag-of-words over unigrams and bigrams. A term only counts when it shows up
//! in at least `MIN_DOCUMENT_FREQUENCY` descriptions.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_DOCUMENT_FREQUENCY: u32 = 2;

/// Longest n-gram counted. Vocabulary entries with more words never match.
const MAX_NGRAM: usize = 2;

/// Alphabetic tokens, internal hyphens allowed, at least two characters.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z-]*[a-z]\b").expect("token pattern is valid"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "again", "against", "all", "almost", "also",
        "am", "among", "an", "and", "any", "are", "as", "at", "be", "because", "been", "before",
        "being", "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
        "doing", "down", "during", "each", "either", "etc", "every", "few", "for", "from",
        "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
        "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may",
        "me", "might", "more", "most", "must", "my", "no", "nor", "not", "now", "of", "off", "on",
        "once", "only", "or", "other", "our", "ours", "out", "over", "own", "per", "same", "she",
        "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
        "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "when", "where",
        "whether", "which", "while", "who", "whom", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// Corpus count for one vocabulary skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSkill {
    pub skill: String,
    pub count: u32,
}

#[derive(Debug, Default, Clone, Copy)]
struct TermStats {
    occurrences: u32,
    documents: u32,
}

/// Lowercases, tokenizes and drops stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(String::from)
        .collect()
}

/// Unigrams and bigrams of adjacent surviving tokens.
fn ngrams(tokens: &[String]) -> Vec<String> {
    (1..=MAX_NGRAM)
        .flat_map(|n| tokens.windows(n).map(|w| w.join(" ")))
        .collect()
}

/// Scores every vocabulary entry against the corpus, highest count first.
///
/// Unseen entries and terms below the document-frequency threshold score 0.
/// Ties keep vocabulary order.
pub fn trending_skills<S: AsRef<str>>(descriptions: &[S], vocabulary: &[String]) -> Vec<TrendingSkill> {
    let mut stats: HashMap<String, TermStats> = HashMap::new();
    for description in descriptions {
        let mut seen_here = HashSet::new();
        for term in ngrams(&tokenize(description.as_ref())) {
            let entry = stats.entry(term.clone()).or_default();
            entry.occurrences += 1;
            if seen_here.insert(term) {
                entry.documents += 1;
            }
        }
    }

    let mut scores: Vec<TrendingSkill> = vocabulary
        .iter()
        .map(|skill| {
            let count = stats
                .get(skill.as_str())
                .filter(|s| s.documents >= MIN_DOCUMENT_FREQUENCY)
                .map_or(0, |s| s.occurrences);
            TrendingSkill {
                skill: skill.clone(),
                count,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.count.cmp(&a.count));
    scores
}
