pub mod analyzer;
pub mod extract;
pub mod facts;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod similarity;
pub mod skills;
pub mod vocabulary;

/// The first `n_chars` characters of `text`, cut on a char boundary.
pub(crate) fn char_prefix(text: &str, n_chars: usize) -> &str {
    match text.char_indices().nth(n_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_prefix_counts_chars_not_bytes() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("abc", 10), "abc");
        assert_eq!(char_prefix("abc", 0), "");
    }
}
