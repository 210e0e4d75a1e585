//! Skill Matcher — exact and fuzzy matching of resume text against the vocabulary.
//!
//! Algorithm:
//! 1. Exact pass: every vocabulary term that is a substring of the lower-cased text.
//! 2. Candidates: noun chunks (2–50 chars), entity spans, and `[a-z#+.-]{2,}`
//!    tokens (≤ 40 chars), all drawn from a bounded prefix of the text.
//! 3. Fuzzy pass: each candidate's best vocabulary match by `token_sort_ratio`,
//!    accepted when the score meets the threshold.
//! 4. Order by first offset of the skill in the lower-cased text. Skills that
//!    never occur literally have no offset and go first, alphabetically.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::resume::analyzer::TextAnalyzer;
use crate::resume::char_prefix;
use crate::resume::parser::ParserSettings;
use crate::resume::similarity::best_match;
use crate::resume::vocabulary::SkillVocabulary;

static SKILL_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z#+.\-]{2,}").expect("skill token regex is valid"));

pub fn extract_skills(
    text: &str,
    vocabulary: &SkillVocabulary,
    analyzer: &dyn TextAnalyzer,
    settings: &ParserSettings,
) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut found = exact_matches(&lower, vocabulary);
    let exact_count = found.len();

    let candidates = candidate_phrases(text, analyzer, settings);
    let threshold = f64::from(settings.fuzzy_threshold);
    for candidate in &candidates {
        if let Some((term, _score)) = best_match(candidate, vocabulary.prepared(), threshold) {
            found.insert(term.to_string());
        }
    }

    debug!(
        exact = exact_count,
        fuzzy_only = found.len() - exact_count,
        candidates = candidates.len(),
        "Skill matching complete"
    );

    order_by_occurrence(found, &lower)
}

/// Vocabulary terms occurring verbatim in already lower-cased text.
pub fn exact_matches(lower: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    vocabulary
        .iter()
        .filter(|term| lower.contains(term))
        .map(str::to_string)
        .collect()
}

/// Lower-cased candidate phrases for fuzzy matching.
pub fn candidate_phrases(
    text: &str,
    analyzer: &dyn TextAnalyzer,
    settings: &ParserSettings,
) -> BTreeSet<String> {
    let prefix = char_prefix(text, settings.candidate_prefix_chars);
    let analysis = analyzer.analyze(prefix);
    let mut candidates = BTreeSet::new();

    let chunk_range = settings.noun_chunk_min_chars..=settings.noun_chunk_max_chars;
    for chunk in &analysis.noun_chunks {
        let chunk = chunk.trim().to_lowercase();
        if chunk_range.contains(&chunk.chars().count()) {
            candidates.insert(chunk);
        }
    }

    for entity in &analysis.entities {
        let span = entity.text.trim().to_lowercase();
        if !span.is_empty() {
            candidates.insert(span);
        }
    }

    let prefix_lower = prefix.to_lowercase();
    for token in SKILL_TOKEN_RE.find_iter(&prefix_lower) {
        if token.as_str().chars().count() <= settings.token_max_chars {
            candidates.insert(token.as_str().to_string());
        }
    }

    candidates
}

fn order_by_occurrence(skills: BTreeSet<String>, lower: &str) -> Vec<String> {
    let mut ordered: Vec<(Option<usize>, String)> = skills
        .into_iter()
        .map(|skill| (lower.find(skill.as_str()), skill))
        .collect();

    // `None` orders before every `Some`, so unlocated skills lead.
    ordered.sort();

    ordered.into_iter().map(|(_, skill)| skill).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::analyzer::{Analysis, Entity, EntityLabel, HeuristicAnalyzer};

    /// Returns fixed chunks/entities regardless of input.
    struct ScriptedAnalyzer {
        chunks: Vec<&'static str>,
        entities: Vec<&'static str>,
    }

    impl TextAnalyzer for ScriptedAnalyzer {
        fn analyze(&self, _text: &str) -> Analysis {
            Analysis {
                entities: self
                    .entities
                    .iter()
                    .map(|t| Entity {
                        text: t.to_string(),
                        label: EntityLabel::Misc,
                    })
                    .collect(),
                noun_chunks: self.chunks.iter().map(|c| c.to_string()).collect(),
            }
        }
    }

    fn skills(text: &str, vocab: &[&str]) -> Vec<String> {
        extract_skills(
            text,
            &SkillVocabulary::from_terms(vocab),
            &HeuristicAnalyzer,
            &ParserSettings::default(),
        )
    }

    #[test]
    fn test_exact_matches_ordered_by_first_occurrence() {
        let found = skills(
            "Skills: Python, SQL, Docker",
            &["docker", "python", "sql", "haskell"],
        );
        assert_eq!(found, vec!["python", "sql", "docker"]);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(skills("KUBERNETES and Git", &["git", "kubernetes"]), vec!["kubernetes", "git"]);
    }

    #[test]
    fn test_fuzzy_match_recovers_typo() {
        let found = skills("Deployed on Kubernets clusters", &["kubernetes", "python"]);
        assert_eq!(found, vec!["kubernetes"]);
    }

    #[test]
    fn test_fuzzy_match_ignores_token_order() {
        let found = skills("Focus: learning machine, robotics", &["machine learning"]);
        assert_eq!(found, vec!["machine learning"]);
    }

    #[test]
    fn test_below_threshold_is_rejected() {
        // "pgsql" vs "mysql" scores 60
        assert!(skills("Used pgsql daily", &["mysql"]).is_empty());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let settings = ParserSettings {
            fuzzy_threshold: 60,
            ..ParserSettings::default()
        };
        let found = extract_skills(
            "Used pgsql daily",
            &SkillVocabulary::from_terms(["mysql"]),
            &HeuristicAnalyzer,
            &settings,
        );
        assert_eq!(found, vec!["mysql"]);
    }

    #[test]
    fn test_fuzzy_only_skills_sort_before_located_ones() {
        let found = skills("Kubernets operator written in Rust", &["kubernetes", "rust"]);
        assert_eq!(found, vec!["kubernetes", "rust"]);
    }

    #[test]
    fn test_unlocated_skills_are_alphabetical() {
        let found = skills("Pyhton and Kubernets, then Git", &["git", "kubernetes", "python"]);
        assert_eq!(found, vec!["kubernetes", "python", "git"]);
    }

    #[test]
    fn test_results_are_unique() {
        let found = skills("python Python PYTHON pyhton", &["python"]);
        assert_eq!(found, vec!["python"]);
    }

    #[test]
    fn test_every_skill_is_in_vocabulary() {
        let vocab = SkillVocabulary::from_terms(["aws", "docker", "react", "node.js"]);
        let found = extract_skills(
            "Built React apps with NodeJS, shipped via Docker to AWS Lambda",
            &vocab,
            &HeuristicAnalyzer,
            &ParserSettings::default(),
        );
        assert!(!found.is_empty());
        assert!(found.iter().all(|s| vocab.contains(s)));
    }

    #[test]
    fn test_chunk_length_bounds_apply() {
        let analyzer = ScriptedAnalyzer {
            chunks: vec!["x", "distributed systems", "y"],
            entities: vec![],
        };
        let candidates = candidate_phrases("", &analyzer, &ParserSettings::default());
        assert!(candidates.contains("distributed systems"));
        assert!(!candidates.contains("x"));
    }

    #[test]
    fn test_entities_become_lowercase_candidates() {
        let analyzer = ScriptedAnalyzer {
            chunks: vec![],
            entities: vec!["  Google Cloud "],
        };
        let candidates = candidate_phrases("", &analyzer, &ParserSettings::default());
        assert!(candidates.contains("google cloud"));
    }

    #[test]
    fn test_tokens_respect_length_cap_and_prefix() {
        let long_token = "a".repeat(41);
        let text = format!("c# {long_token} rust");
        let settings = ParserSettings {
            candidate_prefix_chars: 45,
            ..ParserSettings::default()
        };
        let silent = ScriptedAnalyzer {
            chunks: vec![],
            entities: vec![],
        };
        let candidates = candidate_phrases(&text, &silent, &settings);
        assert!(candidates.contains("c#"));
        assert!(!candidates.contains(&long_token));
        assert!(!candidates.contains("rust"));
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(skills("", &["python"]).is_empty());
    }
}
