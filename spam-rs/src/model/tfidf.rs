//! Pretrained TF-IDF vectorizer
//!
//! Reproduces the transform side of a word-level TF-IDF vectorizer: the
//! vocabulary and idf weights are fixed at training time and only loaded here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::{SparseRow, Vectorizer};
use crate::error::{Result, SpamError};

/// Default token pattern: runs of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// `norm` as written by exporters: `"l1"`, `"l2"`, `"none"` or `null`
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum NormName {
    L1,
    L2,
    None,
}

fn deserialize_norm<'de, D>(deserializer: D) -> std::result::Result<Option<Norm>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NormName>::deserialize(deserializer)? {
        Some(NormName::L1) => Some(Norm::L1),
        Some(NormName::L2) => Some(Norm::L2),
        Some(NormName::None) | None => None,
    })
}

/// Serialized form of the vectorizer, validated on conversion.
///
/// Unknown keys (`token_pattern`, `stop_words`, ...) are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TfidfArtifact {
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm", deserialize_with = "deserialize_norm")]
    norm: Option<Norm>,
    #[serde(default)]
    binary: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// TF-IDF vectorizer over a frozen vocabulary
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TfidfArtifact")]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    lowercase: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
    binary: bool,
}

impl TryFrom<TfidfArtifact> for TfidfVectorizer {
    type Error = SpamError;

    fn try_from(artifact: TfidfArtifact) -> Result<Self> {
        let size = artifact.vocabulary.len();

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SpamError::Artifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let mut seen = vec![false; size];
        for (term, &column) in &artifact.vocabulary {
            if column >= size || seen[column] {
                return Err(SpamError::Artifact(format!(
                    "vocabulary column {} for '{}' is out of range or duplicated",
                    column, term
                )));
            }
            seen[column] = true;
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != size {
                return Err(SpamError::DimensionMismatch {
                    context: "idf weights",
                    expected: size,
                    actual: idf.len(),
                });
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(SpamError::Artifact("idf weights must be finite".to_string()));
            }
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            binary: artifact.binary,
        })
    }
}

impl TfidfVectorizer {
    /// Build a unigram, l2-normalized vectorizer from a vocabulary and idf weights
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        TfidfArtifact {
            vocabulary,
            idf: Some(idf),
            ngram_range: default_ngram_range(),
            lowercase: true,
            sublinear_tf: false,
            norm: default_norm(),
            binary: false,
        }
        .try_into()
    }

    /// Set the n-gram range (inclusive)
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || min_n > max_n {
            return Err(SpamError::Artifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        self.ngram_range = (min_n, max_n);
        Ok(self)
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Read a vectorizer from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Word n-grams of `text`, in document order
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&text).map(|m| m.as_str()).collect();
        let (min_n, max_n) = self.ngram_range;

        let mut grams = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<SparseRow> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&gram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        debug!(terms = counts.len(), "Vectorized document");

        let weighted = counts.into_iter().map(|(column, count)| {
            let tf = if self.binary {
                1.0
            } else if self.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };
            let idf = self.idf.as_ref().map_or(1.0, |idf| idf[column]);
            (column, tf * idf)
        });

        let mut row = SparseRow::from_pairs(self.num_features(), weighted)?;

        let norm = match self.norm {
            Some(Norm::L2) => row.values().iter().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.values().iter().map(|v| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if norm > 0.0 {
            row.map_values(|v| v / norm);
        }

        Ok(row)
    }

    fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn unigrams(&self) -> Vec<String> {
        self.vocabulary
            .keys()
            .filter(|term| !term.contains(' '))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect()
    }

    #[test]
    fn test_unigram_l2_normalized() {
        let v = TfidfVectorizer::new(vocab(&["cash", "free", "win"]), vec![1.0, 2.0, 1.0]).unwrap();
        let row = v.transform("free cash").unwrap();

        let norm = (1.0f64 + 4.0).sqrt();
        assert_eq!(row.dim(), 3);
        assert!((row.get(0) - 1.0 / norm).abs() < 1e-12);
        assert!((row.get(1) - 2.0 / norm).abs() < 1e-12);
        assert_eq!(row.get(2), 0.0);
    }

    #[test]
    fn test_out_of_vocabulary_text_is_zero_row() {
        let v = TfidfVectorizer::new(vocab(&["cash"]), vec![1.0]).unwrap();
        let row = v.transform("meeting tomorrow").unwrap();
        assert_eq!(row.nnz(), 0);
        assert_eq!(row.dim(), 1);
    }

    #[test]
    fn test_single_letter_tokens_ignored() {
        let v = TfidfVectorizer::new(vocab(&["a", "ok"]), vec![1.0, 1.0]).unwrap();
        let row = v.transform("a ok").unwrap();
        assert_eq!(row.indices(), &[1]);
    }

    #[test]
    fn test_repeated_terms_and_sublinear_tf() {
        let v = TfidfVectorizer::new(vocab(&["win", "cash"]), vec![1.0, 1.0])
            .unwrap()
            .with_norm(None);
        let row = v.transform("win win win cash").unwrap();
        assert_eq!(row.get(0), 3.0);

        let v = v.with_sublinear_tf(true);
        let row = v.transform("win win win cash").unwrap();
        assert!((row.get(0) - (1.0 + 3f64.ln())).abs() < 1e-12);
        assert_eq!(row.get(1), 1.0);
    }

    #[test]
    fn test_bigrams() {
        let v = TfidfVectorizer::new(vocab(&["free", "free cash"]), vec![1.0, 1.0])
            .unwrap()
            .with_ngram_range(1, 2)
            .unwrap()
            .with_norm(Some(Norm::L1));
        let row = v.transform("free cash").unwrap();
        assert_eq!(row.get(0), 0.5);
        assert_eq!(row.get(1), 0.5);
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{"vocabulary": {"free": 1, "cash": 0}, "idf": [1.5, 2.0]}"#;
        let v = TfidfVectorizer::from_json(json).unwrap();
        assert_eq!(v.num_features(), 2);
        assert_eq!(v.ngram_range, (1, 1));
        assert_eq!(v.norm, Some(Norm::L2));
    }

    #[test]
    fn test_from_json_rejects_bad_idf() {
        let json = r#"{"vocabulary": {"free": 0, "cash": 1}, "idf": [1.5]}"#;
        assert!(TfidfVectorizer::from_json(json).is_err());

        let json = r#"{"vocabulary": {"free": 0, "cash": 0}, "idf": [1.0, 1.0]}"#;
        assert!(TfidfVectorizer::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_norm_settings() {
        let base = r#""vocabulary": {"free": 0, "cash": 1}, "idf": [1.0, 1.0]"#;
        for (norm, expected) in [
            (r#""l1""#, Some(Norm::L1)),
            (r#""l2""#, Some(Norm::L2)),
            (r#""none""#, None),
            ("null", None),
        ] {
            let json = format!(r#"{{{}, "norm": {}}}"#, base, norm);
            let v = TfidfVectorizer::from_json(&json).unwrap();
            assert_eq!(v.norm, expected, "norm {}", norm);
        }

        let json = format!(r#"{{{}, "norm": "max"}}"#, base);
        assert!(TfidfVectorizer::from_json(&json).is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_settings() {
        let json = r#"{"vocabulary": {"free": 0}, "idf": [1.0], "stop_words": "english"}"#;
        assert!(TfidfVectorizer::from_json(json).is_err());

        let json = r#"{"vocabulary": {"free": 0}, "idf": [1.0], "token_pattern": "\\S+"}"#;
        assert!(TfidfVectorizer::from_json(json).is_err());
    }
}
