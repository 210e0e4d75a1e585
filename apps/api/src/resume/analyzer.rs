//! Language analysis — named-entity spans and noun-phrase chunks over resume text.
//!
//! `TextAnalyzer` is the seam the fact extractors and the skill matcher depend on.
//! The default `HeuristicAnalyzer` is rule-based: it needs no model files, and its
//! lexicons are built once per process behind `Lazy` statics, so a single shared
//! instance is safe to reuse from any number of request threads.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Misc,
}

/// A named-entity span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Entities in document order.
    pub entities: Vec<Entity>,
    /// Noun-phrase chunks in document order, original casing.
    pub noun_chunks: Vec<String>,
}

impl Analysis {
    /// First entity tagged as a person, if any.
    pub fn first_person(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.label == EntityLabel::Person)
    }
}

/// Produces entities and noun chunks for a piece of text.
///
/// Implementations must be immutable after construction; the parser shares one
/// instance across concurrent requests.
pub trait TextAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Analysis;
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicons
// ────────────────────────────────────────────────────────────────────────────

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9#+.'&\-]*").expect("token regex is valid"));

static NAME_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:full\s+)?name\s*[:\-]\s*").expect("name label regex is valid")
});

// "Jane", "O'Neil", "Mary-Jane", "J." or "J"
static NAME_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-z]*(?:[-'][A-Z]?[a-z]+)*\.?$").expect("name token regex is valid")
});

static CHUNK_DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[,;:|•·()\[\]{}!?"]|\s[-–—]\s|\.(?:\s|$)"#).expect("chunk delimiter regex is valid")
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "nor", "of", "in", "on", "at", "to", "for",
        "with", "without", "using", "used", "use", "by", "from", "as", "is", "are", "was",
        "were", "be", "been", "being", "am", "i", "me", "my", "we", "our", "you", "your",
        "he", "she", "his", "her", "they", "their", "it", "its", "this", "that", "these",
        "those", "via", "over", "into", "onto", "across", "including", "such", "etc",
        "also", "both", "each", "per", "than", "then", "while", "within", "about",
        "have", "has", "had", "will", "would", "can", "could", "should", "not", "no",
        "all", "any", "some", "more", "most", "other", "through", "under", "up", "out",
    ]
    .into_iter()
    .collect()
});

/// Words that never appear in a person's name on a resume header.
static NON_NAME_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // headings
        "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective",
        "experience", "education", "skills", "projects", "project", "certifications",
        "contact", "references", "languages", "interests", "achievements", "awards",
        "publications", "work", "history", "professional", "technical", "personal",
        "details", "information", "employment", "career", "qualifications", "email",
        "phone", "address", "mobile", "linkedin", "github", "portfolio", "website",
        // titles
        "engineer", "developer", "manager", "analyst", "consultant", "intern",
        "designer", "architect", "lead", "senior", "junior", "principal", "staff",
        "scientist", "administrator", "specialist", "director", "head", "officer",
        "associate", "assistant", "student", "graduate", "researcher", "programmer",
        // organizations and places
        "university", "college", "school", "institute", "academy", "inc", "llc", "ltd",
        "corp", "corporation", "company", "technologies", "technology", "solutions",
        "systems", "group", "bank", "labs", "services", "software", "cloud", "platform",
        "street", "road", "avenue", "city", "new", "san", "united", "states",
        // dates and degrees
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "present", "current",
        "bachelor", "master", "science", "engineering", "arts", "computer", "data",
        "machine", "learning", "web", "full", "stack", "backend", "frontend",
    ]
    .into_iter()
    .collect()
});

static ORG_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "inc", "llc", "ltd", "limited", "corp", "corporation", "co", "company", "gmbh",
        "plc", "university", "college", "institute", "school", "academy", "technologies",
        "solutions", "systems", "labs", "group", "bank", "foundation",
    ]
    .into_iter()
    .collect()
});

static ORG_PREFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["university", "college", "institute", "school", "academy"].into_iter().collect());

// ────────────────────────────────────────────────────────────────────────────
// HeuristicAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based analyzer for English resumes.
///
/// - Person: a line holding 2–4 name-shaped capitalized tokens, optionally after
///   a `Name:` label, none of them a heading, title or place word.
/// - Organization: a capitalized run ending in (or starting with) an
///   organization word such as `Inc` or `University`.
/// - Misc: any other run of capitalized or upper-case tokens.
/// - Noun chunks: runs of non-stopword, non-numeric tokens between punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl TextAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, text: &str) -> Analysis {
        let mut analysis = Analysis::default();

        for line in text.split(['\n', '\r']) {
            if let Some(person) = person_in_line(line) {
                analysis.entities.push(person);
            } else {
                analysis.entities.extend(capitalized_runs(line));
            }
            analysis.noun_chunks.extend(noun_chunks(line));
        }

        analysis
    }
}

fn person_in_line(line: &str) -> Option<Entity> {
    let content_start = NAME_LABEL_RE.find(line).map(|m| m.end()).unwrap_or(0);
    let content = line[content_start..].trim();
    if content.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = content.split_whitespace().collect();
    if !(2..=4).contains(&tokens.len()) {
        return None;
    }
    if !tokens.iter().all(|t| NAME_TOKEN_RE.is_match(t)) {
        return None;
    }
    if !tokens.iter().any(|t| t.trim_end_matches('.').len() > 1) {
        return None;
    }
    if tokens
        .iter()
        .any(|t| NON_NAME_WORDS.contains(t.trim_end_matches('.').to_lowercase().as_str()))
    {
        return None;
    }

    Some(Entity {
        text: content.to_string(),
        label: EntityLabel::Person,
    })
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn capitalized_runs(line: &str) -> Vec<Entity> {
    let tokens: Vec<(usize, &str)> = TOKEN_RE
        .find_iter(line)
        .map(|m| (m.start(), m.as_str()))
        .collect();

    let mut entities = Vec::new();
    let mut run: Vec<(usize, &str)> = Vec::new();

    for (i, &(start, token)) in tokens.iter().enumerate() {
        let joined_by_space = run
            .last()
            .map(|&(prev_start, prev)| line[prev_start + prev.len()..start].trim().is_empty())
            .unwrap_or(true);

        if !joined_by_space {
            flush_run(line, &mut run, &mut entities);
        }

        let is_connector = matches!(token, "of" | "&")
            && !run.is_empty()
            && tokens
                .get(i + 1)
                .is_some_and(|&(_, next)| is_capitalized(next));

        if is_capitalized(token) || is_connector {
            run.push((start, token));
        } else {
            flush_run(line, &mut run, &mut entities);
        }
    }
    flush_run(line, &mut run, &mut entities);

    entities
}

fn flush_run(line: &str, run: &mut Vec<(usize, &str)>, entities: &mut Vec<Entity>) {
    let owned = std::mem::take(run);
    let mut tokens = owned.as_slice();

    while let Some((&(_, first), rest)) = tokens.split_first() {
        if STOPWORDS.contains(first.to_lowercase().as_str()) {
            tokens = rest;
        } else {
            break;
        }
    }

    let (Some(&(start, first)), Some(&(last_start, last))) = (tokens.first(), tokens.last()) else {
        return;
    };

    let first_lower = first.trim_end_matches('.').to_lowercase();
    let last_lower = last.trim_end_matches('.').to_lowercase();

    if tokens.len() == 1 && NON_NAME_WORDS.contains(first_lower.as_str()) {
        return;
    }

    let label = if ORG_SUFFIXES.contains(last_lower.as_str())
        || (tokens.len() > 1 && ORG_PREFIXES.contains(first_lower.as_str()))
    {
        EntityLabel::Organization
    } else {
        EntityLabel::Misc
    };

    let end = last_start + last.len();
    entities.push(Entity {
        text: line[start..end].trim_end_matches('.').to_string(),
        label,
    });
}

fn noun_chunks(line: &str) -> Vec<String> {
    let mut chunks = Vec::new();

    for segment in CHUNK_DELIMITER_RE.split(line) {
        let mut current: Vec<&str> = Vec::new();

        for raw in segment.split_whitespace() {
            let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '#' || c == '+'));
            let breaks_chunk = word.is_empty()
                || STOPWORDS.contains(word.to_lowercase().as_str())
                || word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-');

            if breaks_chunk {
                if !current.is_empty() {
                    chunks.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(word);
            }
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }
    }

    chunks
}
