//! Skills vocabulary — normalized skill names, loaded once per process.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{info, warn};

use crate::resume::similarity::SortedTokens;

/// Used when the configured vocabulary file does not exist.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "django",
    "flask",
    "react",
    "node.js",
    "docker",
    "kubernetes",
    "aws",
    "git",
    "nlp",
    "tensorflow",
    "pytorch",
];

/// Trimmed, lower-cased skill names; every member is non-empty.
///
/// Terms are kept sorted so fuzzy-match ties resolve the same way on every run.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
    prepared: Vec<SortedTokens>,
}

impl SkillVocabulary {
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: BTreeSet<String> = terms
            .into_iter()
            .filter_map(|t| normalize_term(t.as_ref()))
            .collect();
        let prepared = terms.iter().map(|t| SortedTokens::new(t)).collect();
        Self { terms, prepared }
    }

    pub fn builtin() -> Self {
        Self::from_terms(DEFAULT_SKILLS)
    }

    /// Parses vocabulary JSON: either a list of names or an object keyed by name.
    /// Non-string list items are skipped.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::from_terms(items.iter().filter_map(Value::as_str))),
            Value::Object(map) => Ok(Self::from_terms(map.keys())),
            other => anyhow::bail!(
                "skills vocabulary must be a JSON list or object, found {}",
                json_kind(other)
            ),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read skills file '{}'", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Skills file '{}' is not valid JSON", path.display()))?;
        Self::from_json(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in their fuzzy-matching form, in sorted order.
    pub fn prepared(&self) -> &[SortedTokens] {
        &self.prepared
    }
}

fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Lazily loads the vocabulary from a file on first use and caches it.
///
/// Concurrent first calls block on a single initialization; later calls are a
/// plain read. A missing file falls back to [`DEFAULT_SKILLS`], and so does a
/// malformed one (logged), so the service stays usable without the data file.
#[derive(Debug)]
pub struct VocabularySource {
    path: Option<PathBuf>,
    cell: OnceCell<Arc<SkillVocabulary>>,
}

impl VocabularySource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            cell: OnceCell::new(),
        }
    }

    /// A source that is already initialized; used to inject vocabularies.
    pub fn fixed(vocabulary: SkillVocabulary) -> Self {
        Self {
            path: None,
            cell: OnceCell::with_value(Arc::new(vocabulary)),
        }
    }

    pub fn get(&self) -> Arc<SkillVocabulary> {
        self.cell
            .get_or_init(|| Arc::new(self.load_or_default()))
            .clone()
    }

    fn load_or_default(&self) -> SkillVocabulary {
        let Some(path) = self.path.as_deref() else {
            return SkillVocabulary::builtin();
        };

        if !path.exists() {
            info!(
                path = %path.display(),
                "Skills file not found, using built-in vocabulary of {} skills",
                DEFAULT_SKILLS.len()
            );
            return SkillVocabulary::builtin();
        }

        match SkillVocabulary::load(path) {
            Ok(vocabulary) if vocabulary.is_empty() => {
                warn!(path = %path.display(), "Skills file lists no skills, fuzzy matching disabled");
                vocabulary
            }
            Ok(vocabulary) => {
                info!(path = %path.display(), skills = vocabulary.len(), "Skills vocabulary loaded");
                vocabulary
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(path = %path.display(), error = %reason, "Falling back to built-in skills vocabulary");
                SkillVocabulary::builtin()
            }
        }
    }
}
