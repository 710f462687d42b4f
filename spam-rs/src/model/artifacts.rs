//! Loading of the pretrained artifact bundle

use std::path::Path;
use tracing::info;

use super::{Classifier, LinearScaler, NaiveBayes, Scaler, TfidfVectorizer, Vectorizer};
use crate::config::ModelConfig;
use crate::error::{Result, SpamError};
use crate::spam::features::NUMERIC_FEATURES;

/// The three pretrained artifacts the pipeline depends on.
///
/// Loaded once, then shared read-only.
pub struct ModelArtifacts {
    pub vectorizer: Box<dyn Vectorizer>,
    pub scaler: Box<dyn Scaler>,
    pub classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("text_features", &self.vectorizer.num_features())
            .field("numeric_features", &self.scaler.num_features())
            .field("classes", &self.classifier.classes())
            .finish()
    }
}

impl ModelArtifacts {
    /// Bundle artifacts, checking that their widths line up
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if scaler.num_features() != NUMERIC_FEATURES {
            return Err(SpamError::DimensionMismatch {
                context: "scaler features",
                expected: NUMERIC_FEATURES,
                actual: scaler.num_features(),
            });
        }

        let row_width = vectorizer.num_features() + scaler.num_features();
        if classifier.num_features() != row_width {
            return Err(SpamError::DimensionMismatch {
                context: "classifier features",
                expected: row_width,
                actual: classifier.num_features(),
            });
        }

        Ok(Self {
            vectorizer,
            scaler,
            classifier,
        })
    }

    /// Load the JSON exports named in the model configuration
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer = TfidfVectorizer::from_json(&read_artifact(&config.vectorizer_path)?)
            .map_err(|e| with_path(e, &config.vectorizer_path))?;
        info!(
            path = %config.vectorizer_path.display(),
            vocabulary = vectorizer.num_features(),
            "Loaded vectorizer"
        );

        let scaler = LinearScaler::from_json(&read_artifact(&config.scaler_path)?)
            .map_err(|e| with_path(e, &config.scaler_path))?;
        info!(
            path = %config.scaler_path.display(),
            features = scaler.num_features(),
            "Loaded scaler"
        );

        let classifier = NaiveBayes::from_json(&read_artifact(&config.classifier_path)?)
            .map_err(|e| with_path(e, &config.classifier_path))?;
        info!(
            path = %config.classifier_path.display(),
            kind = ?classifier.kind(),
            features = classifier.num_features(),
            "Loaded classifier"
        );

        Self::new(Box::new(vectorizer), Box::new(scaler), Box::new(classifier))
    }

    /// Width of the feature rows fed to the classifier
    pub fn row_width(&self) -> usize {
        self.classifier.num_features()
    }
}

fn read_artifact(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| SpamError::Artifact(format!("Failed to read '{}': {}", path.display(), e)))
}

fn with_path(error: SpamError, path: &Path) -> SpamError {
    SpamError::Artifact(format!("'{}': {}", path.display(), error))
}
