//! Text normalization
//!
//! Turns raw email text into the clean token sequence the vectorizer was fit
//! on. Steps run in a fixed order and each one sees the output of the
//! previous one:
//!
//! 1. lowercase
//! 2. URLs (`http…`, `www…`) → space
//! 3. greetings (whole words) → space
//! 4. anything but ASCII letters → space
//! 5. whitespace tokenization
//! 6. stopword removal
//! 7. token length filter
//! 8. lemmatization

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use super::lemmatizer::Lemmatizer;
use super::lexicon::{GREETINGS, STOPWORDS};
use crate::config::NormalizerConfig;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid URL pattern"));

static GREETING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = GREETINGS.iter().map(|g| regex::escape(g)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).expect("valid greeting pattern")
});

static NON_ALPHA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z]").expect("valid non-alpha pattern"));

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Ordered, fully materialized normalized tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedTokens(Vec<String>);

impl NormalizedTokens {
    /// Tokens joined with single spaces
    pub fn join(&self) -> String {
        self.0.join(" ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for NormalizedTokens {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NormalizedTokens {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Text normalizer with fixed token length bounds
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    min_len: usize,
    max_len: usize,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    /// Normalizer with the default bounds `[2, 13]`
    pub fn new() -> Self {
        let bounds = NormalizerConfig::default();
        Self::with_bounds(bounds.min_token_len, bounds.max_token_len)
    }

    /// Normalizer keeping tokens whose length is in `[min_len, max_len]`
    pub fn with_bounds(min_len: usize, max_len: usize) -> Self {
        Self {
            min_len,
            max_len,
            lemmatizer: Lemmatizer::new(),
        }
    }

    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::with_bounds(config.min_token_len, config.max_token_len)
    }

    /// Replace the lemmatizer (e.g. with a lexicon-backed one)
    pub fn with_lemmatizer(mut self, lemmatizer: Lemmatizer) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Steps 1-4: lowercase and strip URLs, greetings and non-letters
    pub fn strip(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = URL_PATTERN.replace_all(&text, " ");
        let text = GREETING_PATTERN.replace_all(&text, " ");
        NON_ALPHA_PATTERN.replace_all(&text, " ").into_owned()
    }

    /// Normalize `text` into tokens
    pub fn normalize(&self, text: &str) -> NormalizedTokens {
        let stripped = self.strip(text);

        let tokens = stripped
            .split_whitespace()
            .filter(|token| !STOPWORD_SET.contains(token))
            .filter(|token| (self.min_len..=self.max_len).contains(&token.len()))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect();

        NormalizedTokens(tokens)
    }

    /// Normalized tokens joined with single spaces
    pub fn clean_text(&self, text: &str) -> String {
        self.normalize(text).join()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
