//! Token-order-insensitive string similarity on a 0–100 scale.
//!
//! `SortedTokens` sorts whitespace tokens and re-joins them with single spaces;
//! `token_sort_ratio` scores two such keys with rapidfuzz's normalized indel
//! similarity.

use rapidfuzz::fuzz;

/// A string preprocessed into its sorted-token comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedTokens {
    text: String,
    key: Vec<char>,
}

impl SortedTokens {
    pub fn new(text: &str) -> Self {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.sort_unstable();
        Self {
            text: text.to_string(),
            key: tokens.join(" ").chars().collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.key.len()
    }

    /// Similarity of the two sorted keys, 0–100. Empty keys never match.
    pub fn token_sort_ratio(&self, other: &SortedTokens) -> f64 {
        if self.key.is_empty() || other.key.is_empty() {
            return 0.0;
        }
        100.0 * fuzz::ratio(self.key.iter().copied(), other.key.iter().copied())
    }
}

/// Highest similarity any alignment of these lengths could reach.
fn ratio_upper_bound(a: usize, b: usize) -> f64 {
    if a + b == 0 {
        return 0.0;
    }
    200.0 * a.min(b) as f64 / (a + b) as f64
}

/// Best-scoring choice for `query`, returned only when its score is at least
/// `cutoff`. Ties keep the earliest choice.
pub fn best_match<'a>(
    query: &str,
    choices: &'a [SortedTokens],
    cutoff: f64,
) -> Option<(&'a str, f64)> {
    let query = SortedTokens::new(query);
    let mut best: Option<(&'a str, f64)> = None;

    for choice in choices {
        let floor = best.map(|(_, score)| score).unwrap_or(cutoff);
        let bound = ratio_upper_bound(query.len(), choice.len());
        if bound < floor || (best.is_some() && bound <= floor) {
            continue;
        }

        let score = query.token_sort_ratio(choice);
        let improves = match best {
            Some((_, best_score)) => score > best_score,
            None => score >= cutoff,
        };
        if improves {
            best = Some((choice.as_str(), score));
            if score >= 100.0 {
                break;
            }
        }
    }

    best
}
