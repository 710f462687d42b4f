//! Spam classification pipeline
//!
//! Raw subject + body in, `{label, probability}` out: text normalization and
//! ratio features feed a pretrained vectorizer, scaler and classifier.

pub mod classifier;
pub mod features;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod ratios;
pub mod tokenizer;
pub mod types;

pub use classifier::SpamClassifier;
pub use features::{build_feature_row, FeatureBreakdown, FeatureComposer, FeatureRow, NumericFeatures};
pub use lemmatizer::Lemmatizer;
pub use normalizer::{NormalizedTokens, TextNormalizer};
pub use ratios::{suspicious_char_ratio, suspicious_word_count, suspicious_word_ratio};
pub use types::*;
