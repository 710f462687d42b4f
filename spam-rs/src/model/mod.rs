//! Pretrained model artifacts
//!
//! The feature pipeline only talks to the traits in this module. Concrete
//! artifacts (TF-IDF vectorizer, linear scaler, naive Bayes) are read from
//! JSON exports once at start-up and never mutated afterwards, which is why
//! every trait requires `Send + Sync`.

pub mod artifacts;
pub mod naive_bayes;
pub mod scaler;
pub mod sparse;
pub mod tfidf;

pub use artifacts::ModelArtifacts;
pub use naive_bayes::{NaiveBayes, NaiveBayesKind};
pub use scaler::LinearScaler;
pub use sparse::SparseRow;
pub use tfidf::{Norm, TfidfVectorizer};

use crate::error::{Result, SpamError};

/// Maps clean text onto a fixed vocabulary
pub trait Vectorizer: Send + Sync {
    /// Vectorize one document
    fn transform(&self, text: &str) -> Result<SparseRow>;

    /// Width of every row produced by `transform`
    fn num_features(&self) -> usize;

    /// Single-word vocabulary terms; empty when the vocabulary is opaque
    fn unigrams(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Per-feature affine normalization of the hand-engineered features
pub trait Scaler: Send + Sync {
    /// Scale one sample; `sample.len()` must equal `num_features()`
    fn transform(&self, sample: &[f64]) -> Result<Vec<f64>>;

    fn num_features(&self) -> usize;
}

/// Class label of spam messages
pub const POSITIVE_CLASS: i64 = 1;

/// Probabilistic classifier over a full feature row
pub trait Classifier: Send + Sync {
    /// Class labels, in the column order of `predict_proba`
    fn classes(&self) -> &[i64];

    /// Width of the rows this classifier was fit on
    fn num_features(&self) -> usize;

    /// Most likely class label
    fn predict(&self, row: &SparseRow) -> Result<i64>;

    /// Probability of every class, ordered like `classes()`
    fn predict_proba(&self, row: &SparseRow) -> Result<Vec<f64>>;

    /// Probability of [`POSITIVE_CLASS`]
    fn positive_probability(&self, row: &SparseRow) -> Result<f64> {
        let column = self
            .classes()
            .iter()
            .position(|&c| c == POSITIVE_CLASS)
            .ok_or_else(|| {
                SpamError::Artifact(format!(
                    "classifier has no class {} (classes: {:?})",
                    POSITIVE_CLASS,
                    self.classes()
                ))
            })?;

        let proba = self.predict_proba(row)?;
        proba.get(column).copied().ok_or(SpamError::DimensionMismatch {
            context: "class probabilities",
            expected: self.classes().len(),
            actual: proba.len(),
        })
    }
}
