//! Feature composition
//!
//! A feature row is the vectorized clean text followed by the two scaled
//! ratio features, in that order. The scaler and classifier were fit on this
//! exact layout.

use serde::Serialize;
use tracing::debug;

use super::normalizer::{NormalizedTokens, TextNormalizer};
use super::ratios::{suspicious_char_ratio, suspicious_word_ratio};
use super::types::RawEmail;
use crate::error::{Result, SpamError};
use crate::model::{Scaler, SparseRow, Vectorizer};

/// Number of hand-engineered features appended to the text features
pub const NUMERIC_FEATURES: usize = 2;

/// Raw ratio features of one email
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericFeatures {
    pub suspicious_word_ratio: f64,
    pub suspicious_char_ratio: f64,
}

impl NumericFeatures {
    /// Compute both ratios on raw (un-normalized) text
    pub fn from_raw_text(text: &str) -> Self {
        Self {
            suspicious_word_ratio: suspicious_word_ratio(text),
            suspicious_char_ratio: suspicious_char_ratio(text),
        }
    }

    /// Scaler input order: word ratio, then char ratio
    pub fn to_array(self) -> [f64; NUMERIC_FEATURES] {
        [self.suspicious_word_ratio, self.suspicious_char_ratio]
    }
}

/// Full feature row handed to the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    row: SparseRow,
    text_features: usize,
}

impl FeatureRow {
    /// Concatenate a vectorized text row and the scaled numeric features
    pub fn new(text: SparseRow, scaled: &[f64]) -> Self {
        let text_features = text.dim();
        Self {
            row: text.hstack(&SparseRow::from_dense(scaled)),
            text_features,
        }
    }

    /// Total width
    pub fn width(&self) -> usize {
        self.row.dim()
    }

    /// Width of the text part
    pub fn text_features(&self) -> usize {
        self.text_features
    }

    /// The trailing scaled numeric features
    pub fn numeric_part(&self) -> Vec<f64> {
        (self.text_features..self.width()).map(|col| self.row.get(col)).collect()
    }

    pub fn as_sparse(&self) -> &SparseRow {
        &self.row
    }

    pub fn into_sparse(self) -> SparseRow {
        self.row
    }
}

/// Intermediate values of one composition, for inspection
#[derive(Debug, Clone, Serialize)]
pub struct FeatureBreakdown {
    pub full_text: String,
    pub tokens: NormalizedTokens,
    pub clean_text: String,
    pub raw: NumericFeatures,
    pub scaled: Vec<f64>,
    pub text_nnz: usize,
}

/// Builds feature rows from emails with the supplied artifacts
#[derive(Debug, Clone, Default)]
pub struct FeatureComposer {
    normalizer: TextNormalizer,
}

impl FeatureComposer {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Build the feature row of `email`
    pub fn compose(
        &self,
        email: &RawEmail,
        vectorizer: &dyn Vectorizer,
        scaler: &dyn Scaler,
    ) -> Result<FeatureRow> {
        self.compose_explained(email, vectorizer, scaler)
            .map(|(row, _)| row)
    }

    /// Build the feature row and keep every intermediate value
    pub fn compose_explained(
        &self,
        email: &RawEmail,
        vectorizer: &dyn Vectorizer,
        scaler: &dyn Scaler,
    ) -> Result<(FeatureRow, FeatureBreakdown)> {
        let full_text = email.full_text();

        let tokens = self.normalizer.normalize(&full_text);
        let clean_text = tokens.join();

        // Ratios always see the raw text
        let raw = NumericFeatures::from_raw_text(&full_text);
        let scaled = scaler.transform(&raw.to_array())?;
        if scaled.len() != NUMERIC_FEATURES {
            return Err(SpamError::DimensionMismatch {
                context: "scaler output",
                expected: NUMERIC_FEATURES,
                actual: scaled.len(),
            });
        }

        let text_row = vectorizer.transform(&clean_text)?;
        if text_row.dim() != vectorizer.num_features() {
            return Err(SpamError::DimensionMismatch {
                context: "vectorizer output",
                expected: vectorizer.num_features(),
                actual: text_row.dim(),
            });
        }
        let text_nnz = text_row.nnz();

        debug!(
            tokens = tokens.len(),
            text_nnz,
            word_ratio = raw.suspicious_word_ratio,
            char_ratio = raw.suspicious_char_ratio,
            "Composed feature row"
        );

        let row = FeatureRow::new(text_row, &scaled);
        let breakdown = FeatureBreakdown {
            full_text,
            tokens,
            clean_text,
            raw,
            scaled,
            text_nnz,
        };
        Ok((row, breakdown))
    }
}

/// Build the feature row of one email with the default normalizer
pub fn build_feature_row(
    subject: &str,
    body: &str,
    vectorizer: &dyn Vectorizer,
    scaler: &dyn Scaler,
) -> Result<FeatureRow> {
    FeatureComposer::default().compose(&RawEmail::new(subject, body), vectorizer, scaler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearScaler, TfidfVectorizer};
    use std::collections::HashMap;

    fn vectorizer() -> TfidfVectorizer {
        let vocab: HashMap<String, usize> = ["cash", "free", "meeting", "win"]
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        TfidfVectorizer::new(vocab, vec![1.0; 4]).unwrap()
    }

    fn identity_scaler() -> LinearScaler {
        LinearScaler::standard(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_spam_example_row() {
        let row = build_feature_row("FREE", "Win cash now!!!", &vectorizer(), &identity_scaler()).unwrap();

        assert_eq!(row.width(), 6);
        assert_eq!(row.text_features(), 4);

        let dense = row.as_sparse().to_dense();
        let w = 1.0 / 3f64.sqrt();
        for (col, expected) in [(0, w), (1, w), (2, 0.0), (3, w)] {
            assert!((dense[col] - expected).abs() < 1e-12);
        }

        let numeric = row.numeric_part();
        assert!((numeric[0] - 0.6).abs() < 1e-12);
        assert!((numeric[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_features_follow_scaler() {
        let scaler = LinearScaler::standard(vec![0.1, 0.0], vec![0.5, 2.0]).unwrap();
        let row = build_feature_row("FREE", "Win cash now!!!", &vectorizer(), &scaler).unwrap();
        let numeric = row.numeric_part();
        assert!((numeric[0] - 1.0).abs() < 1e-12);
        assert!((numeric[1] - 0.3).abs() < 1e-12);
        // Text part unaffected by scaling
        assert_eq!(row.text_features(), 4);
    }

    #[test]
    fn test_empty_email() {
        let composer = FeatureComposer::default();
        let (row, breakdown) = composer
            .compose_explained(&RawEmail::default(), &vectorizer(), &identity_scaler())
            .unwrap();

        assert_eq!(breakdown.clean_text, "");
        assert!(breakdown.tokens.is_empty());
        assert_eq!(breakdown.raw.to_array(), [0.0, 0.0]);
        assert_eq!(row.as_sparse().nnz(), 0);
        assert_eq!(row.width(), 6);
    }

    #[test]
    fn test_ratios_use_raw_text_and_vectorizer_uses_clean_text() {
        let composer = FeatureComposer::default();
        let email = RawEmail::new("Hello", "Win at http://free.example now!");
        let (_, breakdown) = composer
            .compose_explained(&email, &vectorizer(), &identity_scaler())
            .unwrap();

        // URL and greeting are gone from the clean text...
        assert_eq!(breakdown.clean_text, "win");
        // ...but "free" inside the URL still counts for the raw ratio:
        // hello, win, at, http, ://, free.example, now, ! -> 2 of 8
        assert_eq!(breakdown.raw.suspicious_word_ratio, 0.25);
        assert_eq!(breakdown.raw.suspicious_char_ratio, 0.125);
        assert_eq!(breakdown.full_text, "Hello Win at http://free.example now!");
    }

    #[test]
    fn test_scaler_width_mismatch_is_an_error() {
        let scaler = LinearScaler::standard(vec![0.0], vec![1.0]).unwrap();
        let err = build_feature_row("a", "b", &vectorizer(), &scaler).unwrap_err();
        assert!(matches!(err, SpamError::DimensionMismatch { .. }));
    }
}
