//! End-to-end spam classification
//!
//! Ties the feature composer to the loaded artifacts. A `SpamClassifier` is
//! built once at start-up and shared by reference; classification never
//! mutates it.

use tracing::debug;

use super::features::{FeatureBreakdown, FeatureComposer, FeatureRow};
use super::lemmatizer::Lemmatizer;
use super::normalizer::TextNormalizer;
use super::types::{Label, Prediction, RawEmail};
use crate::config::Config;
use crate::error::{Result, SpamError};
use crate::model::{ModelArtifacts, POSITIVE_CLASS};

/// Spam classifier over pretrained artifacts
#[derive(Debug)]
pub struct SpamClassifier {
    composer: FeatureComposer,
    artifacts: ModelArtifacts,
}

impl SpamClassifier {
    pub fn new(artifacts: ModelArtifacts, normalizer: TextNormalizer) -> Self {
        Self {
            composer: FeatureComposer::new(normalizer),
            artifacts,
        }
    }

    /// Load every artifact named in `config`.
    ///
    /// Lemmas are checked against the configured lexicon, or against the
    /// vectorizer's own unigrams when there is none.
    pub fn from_config(config: &Config) -> Result<Self> {
        let artifacts = ModelArtifacts::load(&config.model)?;
        let lemmatizer = match &config.model.lexicon_path {
            Some(path) => Lemmatizer::from_lexicon_file(path)?,
            None => Lemmatizer::with_vocabulary(artifacts.vectorizer.unigrams()),
        };

        let normalizer = TextNormalizer::from_config(&config.normalizer).with_lemmatizer(lemmatizer);
        Ok(Self::new(artifacts, normalizer))
    }

    /// Width of the rows fed to the classifier
    pub fn row_width(&self) -> usize {
        self.artifacts.row_width()
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Classify one email
    pub fn classify(&self, email: &RawEmail) -> Result<Prediction> {
        let row = self.composer.compose(
            email,
            self.artifacts.vectorizer.as_ref(),
            self.artifacts.scaler.as_ref(),
        )?;
        self.predict_row(&row)
    }

    /// Classify one email and return the intermediate features as well
    pub fn explain(&self, email: &RawEmail) -> Result<(Prediction, FeatureBreakdown)> {
        let (row, breakdown) = self.composer.compose_explained(
            email,
            self.artifacts.vectorizer.as_ref(),
            self.artifacts.scaler.as_ref(),
        )?;
        let prediction = self.predict_row(&row)?;
        Ok((prediction, breakdown))
    }

    fn predict_row(&self, row: &FeatureRow) -> Result<Prediction> {
        let classifier = self.artifacts.classifier.as_ref();
        if row.width() != classifier.num_features() {
            return Err(SpamError::DimensionMismatch {
                context: "feature row",
                expected: classifier.num_features(),
                actual: row.width(),
            });
        }

        let class = classifier.predict(row.as_sparse())?;
        let spam_probability = classifier.positive_probability(row.as_sparse())?;

        let label = if class == POSITIVE_CLASS {
            Label::Spam
        } else {
            Label::Ham
        };
        let prediction = Prediction::new(label, spam_probability);

        debug!(
            label = %prediction.label,
            probability = prediction.probability,
            "Classified email"
        );
        Ok(prediction)
    }
}
