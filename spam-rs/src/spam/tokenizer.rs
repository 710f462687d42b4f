//! Word tokenizer used for word-count denominators
//!
//! Splits on whitespace, then separates word runs from punctuation runs.
//! A run of punctuation is a single token, so `"now!!!"` yields `now` and
//! `!!!`. Hyphens, apostrophes and periods between word characters stay
//! inside the word (`risk-free`, `don't`, `u.s`).

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:[-'.]\w+)*|[^\w\s]+").expect("valid word pattern")
});

/// Tokens of `text`, in order
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Number of tokens in the lowercased `text`
pub fn word_count(text: &str) -> usize {
    tokenize(&text.to_lowercase()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_runs_are_single_tokens() {
        let tokens: Vec<&str> = tokenize("free win cash now!!!").collect();
        assert_eq!(tokens, vec!["free", "win", "cash", "now", "!!!"]);
    }

    #[test]
    fn test_inner_joiners_stay_in_word() {
        let tokens: Vec<&str> = tokenize("a risk-free offer, don't wait...").collect();
        assert_eq!(tokens, vec!["a", "risk-free", "offer", ",", "don't", "wait", "..."]);
    }

    #[test]
    fn test_contraction_and_punctuation_run_count_once() {
        assert_eq!(word_count("don't"), 1);
        assert_eq!(word_count("%)"), 1);
        assert_eq!(word_count("don't miss 50%) off"), 5);
    }

    #[test]
    fn test_currency_and_numbers() {
        let tokens: Vec<&str> = tokenize("win $100 (50%)").collect();
        assert_eq!(tokens, vec!["win", "$", "100", "(", "50", "%)"]);
    }

    #[test]
    fn test_word_count_empty() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
    }

    #[test]
    fn test_word_count_urls_are_kept() {
        // visit, http, ://, x.io, now
        assert_eq!(word_count("visit http://x.io now"), 5);
    }
}
