//! Profile assembly — one text extraction, then every fact extractor and the
//! skill matcher over the same text.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::errors::ResumeError;
use crate::resume::analyzer::{HeuristicAnalyzer, TextAnalyzer};
use crate::resume::extract::extract_text;
use crate::resume::facts::{
    extract_contact_info, extract_education, extract_experience_years, extract_name,
};
use crate::resume::models::CandidateProfile;
use crate::resume::skills::extract_skills;
use crate::resume::vocabulary::VocabularySource;

/// Tunable heuristics shared by the extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// Minimum `token_sort_ratio` (0–100) for a fuzzy skill match.
    pub fuzzy_threshold: u8,
    /// Characters of leading text searched for a person entity.
    pub name_prefix_chars: usize,
    /// Maximum tokens on a first line accepted as a name.
    pub name_max_tokens: usize,
    /// Characters of leading text mined for skill candidates.
    pub candidate_prefix_chars: usize,
    pub noun_chunk_min_chars: usize,
    pub noun_chunk_max_chars: usize,
    pub token_max_chars: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 80,
            name_prefix_chars: 2000,
            name_max_tokens: 4,
            candidate_prefix_chars: 100_000,
            noun_chunk_min_chars: 2,
            noun_chunk_max_chars: 50,
            token_max_chars: 40,
        }
    }
}

/// Turns resume files into [`CandidateProfile`]s.
///
/// Cheap to share behind an `Arc`; the vocabulary and analyzer are read-only
/// after their first use.
pub struct ResumeParser {
    vocabulary: Arc<VocabularySource>,
    analyzer: Arc<dyn TextAnalyzer>,
    settings: ParserSettings,
}

impl ResumeParser {
    pub fn new(
        vocabulary: Arc<VocabularySource>,
        analyzer: Arc<dyn TextAnalyzer>,
        settings: ParserSettings,
    ) -> Self {
        Self {
            vocabulary,
            analyzer,
            settings,
        }
    }

    /// Parser backed by the rule-based analyzer.
    pub fn heuristic(vocabulary: VocabularySource, settings: ParserSettings) -> Self {
        Self::new(Arc::new(vocabulary), Arc::new(HeuristicAnalyzer), settings)
    }

    /// Fails only when `path` does not exist.
    pub fn parse_resume(&self, path: &Path) -> Result<CandidateProfile, ResumeError> {
        let text = extract_text(path)?;
        let profile = self.parse_text(text);

        info!(
            path = %path.display(),
            chars = profile.raw_text.chars().count(),
            skills = profile.skills.len(),
            has_name = profile.name.is_some(),
            "Resume parsed"
        );
        Ok(profile)
    }

    /// Builds a profile from already extracted text.
    pub fn parse_text(&self, text: String) -> CandidateProfile {
        let vocabulary = self.vocabulary.get();
        let analyzer = self.analyzer.as_ref();

        let contact = extract_contact_info(&text);
        let name = extract_name(&text, analyzer, &self.settings);
        let experience_years = extract_experience_years(&text);
        let skills = extract_skills(&text, &vocabulary, analyzer, &self.settings);
        let education = extract_education(&text);

        CandidateProfile {
            raw_text: text,
            name,
            phone: contact.phone,
            email: contact.email,
            experience_years,
            skills,
            education,
        }
    }
}
