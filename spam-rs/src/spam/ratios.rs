//! Hand-engineered density features
//!
//! Both ratios are computed on the raw subject + body text, before any
//! normalization. Their denominator is the word count of the lowercased raw
//! text, so URLs, greetings and punctuation runs all count as words here.

use once_cell::sync::Lazy;
use regex::RegexSet;

use super::lexicon::{SUSPICIOUS_CHARS, SUSPICIOUS_WORDS};
use super::tokenizer;

/// One case-insensitive whole-word pattern per suspicious word
static SUSPICIOUS_WORD_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(
        SUSPICIOUS_WORDS
            .iter()
            .map(|word| format!(r"(?i)\b{}\b", regex::escape(word))),
    )
    .expect("valid suspicious word patterns")
});

/// Suspicious characters per word; 0 when the text has no words
pub fn suspicious_char_ratio(text: &str) -> f64 {
    let words = tokenizer::word_count(text);
    if words == 0 {
        return 0.0;
    }

    let chars = text.chars().filter(|c| SUSPICIOUS_CHARS.contains(c)).count();
    chars as f64 / words as f64
}

/// Number of distinct suspicious words present in `text`
pub fn suspicious_word_count(text: &str) -> usize {
    SUSPICIOUS_WORD_SET.matches(text).iter().count()
}

/// Distinct suspicious words per word; 0 when the text has no words
pub fn suspicious_word_ratio(text: &str) -> f64 {
    let words = tokenizer::word_count(text);
    if words == 0 {
        return 0.0;
    }

    suspicious_word_count(text) as f64 / words as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spam_example() {
        let text = "FREE Win cash now!!!";
        assert_eq!(suspicious_word_count(text), 3);
        assert!((suspicious_word_ratio(text) - 0.6).abs() < 1e-12);
        assert!((suspicious_char_ratio(text) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_blank_text() {
        for text in ["", " ", "\n\t"] {
            assert_eq!(suspicious_char_ratio(text), 0.0);
            assert_eq!(suspicious_word_ratio(text), 0.0);
        }
    }

    #[test]
    fn test_repeated_word_counts_once() {
        // 4 words, one distinct suspicious word
        assert_eq!(suspicious_word_ratio("free free free free"), 0.25);
    }

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(suspicious_word_count("freedom winner cashier"), 0);
        assert_eq!(suspicious_word_count("FREE, Win. CASH?"), 3);
    }

    #[test]
    fn test_hyphenated_entry() {
        // "risk-free" matches both "risk-free" and "free"
        assert_eq!(suspicious_word_count("a risk-free deal"), 3);
    }

    #[test]
    fn test_all_currency_symbols() {
        // $ € £ ! % over 6 words: "pay", "$", "5", "€", "£", "!%"
        let text = "pay $ 5 € £ !%";
        assert!((suspicious_char_ratio(text) - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_word_ratio_bounded_by_list_size() {
        let text = SUSPICIOUS_WORDS.join(" ");
        let words = tokenizer::word_count(&text) as f64;
        let ratio = suspicious_word_ratio(&text);
        assert!(ratio * words <= SUSPICIOUS_WORDS.len() as f64 + 1e-9);
        assert_eq!(suspicious_word_count(&text), SUSPICIOUS_WORDS.len());
    }

    #[test]
    fn test_urls_and_greetings_count_as_words() {
        // dear, !, visit, www.win.example = 4 words; "visit" and "win" match
        let text = "Dear! visit www.win.example";
        assert_eq!(suspicious_word_ratio(text), 0.5);
        assert_eq!(suspicious_char_ratio(text), 0.25);
    }
}
