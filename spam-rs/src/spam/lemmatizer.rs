//! Noun lemmatizer
//!
//! Follows WordNet's `morphy` for nouns: irregular forms come from an
//! exception table, regular plurals are undone by suffix detachment. When a
//! lexicon of valid lemmas is available, every candidate is checked against
//! it and the shortest valid one wins. Without a lexicon a fixed rule
//! ordering picks a single candidate.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SpamError};

/// Noun suffix detachment rules, in `morphy` order
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Irregular plurals
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("alumni", "alumnus"),
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("avalanches", "avalanche"),
    ("cacti", "cactus"),
    ("caches", "cache"),
    ("calves", "calf"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("fungi", "fungus"),
    ("geese", "goose"),
    ("halves", "half"),
    ("headaches", "headache"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("niches", "niche"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Words ending in `s` that are already base forms
const INVARIANT: &[&str] = &[
    "afterwards", "alias", "always", "atlas", "bias", "canvas", "chaos", "christmas", "cosmos",
    "economics", "ethics", "ethos", "kudos", "lens", "mathematics", "means", "news",
    "nevertheless", "pancreas", "pathos", "perhaps", "physics", "politics", "series",
    "sometimes", "species", "towards", "whereas",
];

/// Nouns ending in `ie`, whose plural would otherwise be read as `-y`
const IE_NOUNS: &[&str] = &[
    "auntie", "birdie", "brownie", "calorie", "cookie", "die", "freebie", "genie", "goalie",
    "hippie", "lie", "movie", "newbie", "pie", "prairie", "rookie", "selfie", "smoothie",
    "sweetie", "tie", "veggie", "zombie",
];

/// Noun lemmatizer
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
    lexicon: Option<HashSet<String>>,
    rule_fallback: bool,
}

impl Lemmatizer {
    /// Rule-based lemmatizer without a lexicon
    pub fn new() -> Self {
        Self {
            exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            lexicon: None,
            rule_fallback: true,
        }
    }

    /// Lemmatizer that validates candidates against `lemmas`.
    ///
    /// A word with no valid candidate is returned unchanged.
    pub fn with_lexicon<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            lexicon: Some(lemmas.into_iter().map(Into::into).collect()),
            rule_fallback: false,
        }
    }

    /// Lemmatizer that validates candidates against a vectorizer vocabulary.
    ///
    /// Words with no candidate in the vocabulary go through the rules; they
    /// never reach the feature row either way.
    pub fn with_vocabulary<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_fallback: true,
            ..Self::with_lexicon(terms)
        }
    }

    /// Load a lexicon file with one lemma per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamError::Config(format!("Failed to read lexicon '{}': {}", path.display(), e))
        })?;

        let lemmas: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        debug!(path = %path.display(), lemmas = lemmas.len(), "Loaded lexicon");
        Ok(Self::with_lexicon(lemmas))
    }

    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    /// Base form of a lowercase noun
    pub fn lemmatize(&self, word: &str) -> String {
        match &self.lexicon {
            Some(lexicon) => self.lemmatize_with_lexicon(word, lexicon),
            None => self.lemmatize_by_rules(word),
        }
    }

    fn lemmatize_with_lexicon(&self, word: &str, lexicon: &HashSet<String>) -> String {
        let mut candidates = vec![word.to_string()];
        match self.exceptions.get(word) {
            Some(base) => candidates.push(base.to_string()),
            None => candidates.extend(detach_suffixes(word)),
        }

        // Shortest valid candidate, earliest on ties
        let best = candidates
            .into_iter()
            .filter(|c| lexicon.contains(c))
            .fold(None, |best: Option<String>, c| match best {
                Some(b) if b.len() <= c.len() => Some(b),
                _ => Some(c),
            });

        match best {
            Some(lemma) => lemma,
            None if self.rule_fallback => self.lemmatize_by_rules(word),
            None => word.to_string(),
        }
    }

    fn lemmatize_by_rules(&self, word: &str) -> String {
        if let Some(base) = self.exceptions.get(word) {
            return base.to_string();
        }

        if word.len() <= 3
            || INVARIANT.contains(&word)
            || ["ss", "us", "is"].iter().any(|end| word.ends_with(end))
        {
            return word.to_string();
        }

        if let Some(base) = word.strip_suffix('s') {
            if IE_NOUNS.contains(&base) {
                return base.to_string();
            }
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if word.len() > 4 {
                return format!("{}y", stem);
            }
        }

        for suffix in ["sses", "xes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        word.strip_suffix('s').unwrap_or(word).to_string()
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Every rule output for `word`, in rule order
fn detach_suffixes(word: &str) -> Vec<String> {
    NOUN_RULES
        .iter()
        .filter_map(|(suffix, replacement)| {
            word.strip_suffix(suffix)
                .map(|stem| format!("{}{}", stem, replacement))
        })
        .filter(|candidate| !candidate.is_empty())
        .collect()
}
