//! Fact extractors — contact info, experience years, name and education.
//!
//! Every extractor is a pure function of the text and returns an optional value;
//! absence is the expected outcome for noisy input. Heuristics with fallbacks are
//! ordered strategy lists tried in sequence, each testable on its own.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::analyzer::TextAnalyzer;
use crate::resume::char_prefix;
use crate::resume::parser::ParserSettings;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s()]{7,}\d").expect("phone regex is valid"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9.\-]+").expect("email regex is valid")
});

static YEARS_EXP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\+?\s*(?:years|yrs|year)").expect("years-of-experience regex is valid")
});

static CALENDAR_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2}|19\d{2}").expect("calendar year regex is valid"));

static NAME_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z .'\-]+$").expect("name line regex is valid"));

/// Degree tokens searched for, in reporting order.
pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "b.sc", "b.e", "b.tech", "master", "m.sc", "m.tech", "m.e", "mca", "phd", "ph.d",
];

// ────────────────────────────────────────────────────────────────────────────
// Contact info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// First phone-like and first email-like match anywhere in the text.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        phone: PHONE_RE.find(text).map(|m| m.as_str().to_string()),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience years
// ────────────────────────────────────────────────────────────────────────────

pub type YearsStrategy = fn(&str) -> Option<u32>;

/// Tried in order; the first strategy returning a value wins.
pub const EXPERIENCE_STRATEGIES: &[YearsStrategy] = &[explicit_years, calendar_year_span];

pub fn extract_experience_years(text: &str) -> Option<u32> {
    EXPERIENCE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
}

/// "5 years", "3+ yrs", "1 year" — case-insensitive, first match only.
pub fn explicit_years(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    YEARS_EXP_RE
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Span between the earliest and latest distinct 19xx/20xx years, when at
/// least two distinct years appear.
pub fn calendar_year_span(text: &str) -> Option<u32> {
    let years: BTreeSet<u32> = CALENDAR_YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match (years.first(), years.last()) {
        (Some(first), Some(last)) if years.len() >= 2 => Some(last - first),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Name
// ────────────────────────────────────────────────────────────────────────────

/// Inputs shared by the name strategies.
pub struct NameContext<'a> {
    pub text: &'a str,
    pub analyzer: &'a dyn TextAnalyzer,
    pub settings: &'a ParserSettings,
}

pub type NameStrategy = fn(&NameContext<'_>) -> Option<String>;

pub const NAME_STRATEGIES: &[NameStrategy] = &[name_from_person_entity, name_from_first_line];

pub fn extract_name(text: &str, analyzer: &dyn TextAnalyzer, settings: &ParserSettings) -> Option<String> {
    let ctx = NameContext {
        text,
        analyzer,
        settings,
    };
    NAME_STRATEGIES.iter().find_map(|strategy| strategy(&ctx))
}

/// First person entity found in the leading `name_prefix_chars` of the text.
pub fn name_from_person_entity(ctx: &NameContext<'_>) -> Option<String> {
    let prefix = char_prefix(ctx.text, ctx.settings.name_prefix_chars);
    ctx.analyzer
        .analyze(prefix)
        .first_person()
        .map(|e| e.text.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// First non-blank line, when it is short and made only of name characters.
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn name_from_first_line(ctx: &NameContext<'_>) -> Option<String> {
    let candidate = ctx
        .text
        .split(['\n', '\r'])
        .map(str::trim)
        .find(|l| !l.is_empty())?;

    let short_enough = candidate.split_whitespace().count() <= ctx.settings.name_max_tokens;
    (short_enough && NAME_LINE_RE.is_match(candidate)).then(|| candidate.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Degree keywords present anywhere in the text, in `DEGREE_KEYWORDS` order.
pub fn extract_education(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    DEGREE_KEYWORDS
        .iter()
        .filter(|degree| lower.contains(*degree))
        .map(|degree| degree.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::analyzer::{Analysis, HeuristicAnalyzer};

    struct SilentAnalyzer;

    impl TextAnalyzer for SilentAnalyzer {
        fn analyze(&self, _text: &str) -> Analysis {
            Analysis::default()
        }
    }

    fn settings() -> ParserSettings {
        ParserSettings::default()
    }

    #[test]
    fn test_contact_info_first_matches() {
        let info = extract_contact_info(
            "Jane Roe\njane@example.com | +1 (555) 123-4567\nalt: other@example.org, 020 7946 0958",
        );
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
        assert_eq!(info.phone.as_deref(), Some("+1 (555) 123-4567"));
    }

    #[test]
    fn test_contact_info_absent() {
        assert_eq!(extract_contact_info("no contact here, call 911"), ContactInfo::default());
    }

    #[test]
    fn test_short_digit_runs_are_not_phones() {
        assert_eq!(extract_contact_info("Room 12-34").phone, None);
    }

    #[test]
    fn test_explicit_years_case_insensitive() {
        assert_eq!(extract_experience_years("Experience: 3 years"), Some(3));
        assert_eq!(extract_experience_years("7+ YRS in backend work"), Some(7));
        assert_eq!(extract_experience_years("over 1 Year of Rust"), Some(1));
    }

    #[test]
    fn test_explicit_years_takes_first_match() {
        assert_eq!(explicit_years("5 years Rust, 10 years C"), Some(5));
    }

    #[test]
    fn test_year_span_fallback() {
        assert_eq!(extract_experience_years("Acme 2018 - 2021"), Some(3));
        assert_eq!(
            calendar_year_span("1999 intern, 2005 dev, 2005 lead"),
            Some(6)
        );
    }

    #[test]
    fn test_single_year_gives_none() {
        assert_eq!(extract_experience_years("Graduated 2020, 2020 cohort"), None);
    }

    #[test]
    fn test_explicit_phrase_wins_over_span() {
        assert_eq!(extract_experience_years("2 years at Acme (2010 - 2020)"), Some(2));
    }

    #[test]
    fn test_no_experience_signal() {
        assert_eq!(extract_experience_years("Fresh graduate"), None);
    }

    #[test]
    fn test_name_from_entity() {
        let name = extract_name("John Doe\nEmail: john@x.io", &HeuristicAnalyzer, &settings());
        assert_eq!(name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_name_entity_limited_to_prefix() {
        let text = format!("{}\nJane Roe", "x".repeat(2100));
        let ctx = NameContext {
            text: &text,
            analyzer: &HeuristicAnalyzer,
            settings: &settings(),
        };
        assert_eq!(name_from_person_entity(&ctx), None);
    }

    #[test]
    fn test_name_falls_back_to_first_line() {
        let name = extract_name("\n\n  madonna  \nSinger", &SilentAnalyzer, &settings());
        assert_eq!(name.as_deref(), Some("madonna"));
    }

    #[test]
    fn test_first_line_fallback_splits_on_carriage_returns() {
        let s = settings();
        let name = extract_name("Jane Roe\rjane@example.com\r5 years", &SilentAnalyzer, &s);
        assert_eq!(name.as_deref(), Some("Jane Roe"));
        let name = extract_name("\r\nJane Roe\r\nSkills: Rust", &SilentAnalyzer, &s);
        assert_eq!(name.as_deref(), Some("Jane Roe"));
    }

    #[test]
    fn test_first_line_fallback_rejects_long_or_symbolic_lines() {
        let s = settings();
        assert_eq!(extract_name("one two three four five", &SilentAnalyzer, &s), None);
        assert_eq!(extract_name("jane@example.com", &SilentAnalyzer, &s), None);
        assert_eq!(extract_name("R2-D2", &SilentAnalyzer, &s), None);
    }

    #[test]
    fn test_first_line_fallback_respects_token_limit_setting() {
        let s = ParserSettings {
            name_max_tokens: 2,
            ..ParserSettings::default()
        };
        assert_eq!(extract_name("Jean Luc Picard", &SilentAnalyzer, &s), None);
    }

    #[test]
    fn test_name_absent_for_empty_text() {
        assert_eq!(extract_name("", &HeuristicAnalyzer, &settings()), None);
    }

    #[test]
    fn test_education_in_fixed_order() {
        let found = extract_education("PhD in CS (2020); B.Tech from IIT; Master of Science");
        assert_eq!(found, vec!["b.tech", "master", "phd"]);
    }

    #[test]
    fn test_education_substring_tokens_overlap() {
        let found = extract_education("Ph.D. candidate");
        assert_eq!(found, vec!["ph.d"]);
    }

    #[test]
    fn test_education_absent() {
        assert!(extract_education("Self-taught developer").is_empty());
    }
}
