//! Pretrained naive Bayes classifiers
//!
//! Both supported variants reduce to a linear joint log-likelihood per class,
//! `jll[c] = row · weights[c] + bias[c]`, so the weights are folded once when
//! the artifact is loaded and prediction is a handful of sparse dot products.

use serde::{Deserialize, Serialize};

use super::{Classifier, SparseRow};
use crate::error::{Result, SpamError};

/// Event model of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaiveBayesKind {
    /// Feature counts (or tf-idf weights) as multinomial events
    Multinomial,
    /// Features binarized at a threshold, absent features count as evidence
    Bernoulli,
}

#[derive(Debug, Clone, Deserialize)]
struct NaiveBayesArtifact {
    kind: NaiveBayesKind,
    classes: Vec<i64>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    #[serde(default)]
    binarize: Option<f64>,
}

/// Naive Bayes classifier with frozen parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "NaiveBayesArtifact")]
pub struct NaiveBayes {
    kind: NaiveBayesKind,
    classes: Vec<i64>,
    num_features: usize,
    binarize: Option<f64>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl TryFrom<NaiveBayesArtifact> for NaiveBayes {
    type Error = SpamError;

    fn try_from(artifact: NaiveBayesArtifact) -> Result<Self> {
        let n_classes = artifact.classes.len();
        if n_classes < 2 {
            return Err(SpamError::Artifact(format!(
                "naive Bayes needs at least two classes, got {}",
                n_classes
            )));
        }
        if artifact.class_log_prior.len() != n_classes {
            return Err(SpamError::DimensionMismatch {
                context: "class_log_prior",
                expected: n_classes,
                actual: artifact.class_log_prior.len(),
            });
        }
        if artifact.feature_log_prob.len() != n_classes {
            return Err(SpamError::DimensionMismatch {
                context: "feature_log_prob classes",
                expected: n_classes,
                actual: artifact.feature_log_prob.len(),
            });
        }

        let num_features = artifact.feature_log_prob[0].len();
        for probs in &artifact.feature_log_prob {
            if probs.len() != num_features {
                return Err(SpamError::DimensionMismatch {
                    context: "feature_log_prob features",
                    expected: num_features,
                    actual: probs.len(),
                });
            }
        }

        let binarize = match artifact.kind {
            NaiveBayesKind::Multinomial => None,
            NaiveBayesKind::Bernoulli => artifact.binarize,
        };
        if binarize.is_some_and(|t| t < 0.0) {
            return Err(SpamError::Artifact(
                "negative binarize threshold would densify sparse rows".to_string(),
            ));
        }

        let (weights, bias) = match artifact.kind {
            NaiveBayesKind::Multinomial => (artifact.feature_log_prob, artifact.class_log_prior),
            NaiveBayesKind::Bernoulli => {
                let mut weights: Vec<Vec<f64>> = Vec::with_capacity(n_classes);
                let mut bias: Vec<f64> = Vec::with_capacity(n_classes);
                for (probs, prior) in artifact.feature_log_prob.iter().zip(&artifact.class_log_prior) {
                    if probs.iter().any(|&p| p >= 0.0) {
                        return Err(SpamError::Artifact(
                            "Bernoulli feature_log_prob must be strictly negative".to_string(),
                        ));
                    }
                    let neg: Vec<f64> = probs.iter().map(|&p| (-p.exp()).ln_1p()).collect();
                    weights.push(probs.iter().zip(&neg).map(|(p, n)| p - n).collect());
                    bias.push(prior + neg.iter().sum::<f64>());
                }
                (weights, bias)
            }
        };

        Ok(Self {
            kind: artifact.kind,
            classes: artifact.classes,
            num_features,
            binarize,
            weights,
            bias,
        })
    }
}

impl NaiveBayes {
    /// Read a classifier from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> NaiveBayesKind {
        self.kind
    }

    /// Joint log-likelihood of `row` under every class
    fn joint_log_likelihood(&self, row: &SparseRow) -> Result<Vec<f64>> {
        if row.dim() != self.num_features {
            return Err(SpamError::DimensionMismatch {
                context: "classifier input",
                expected: self.num_features,
                actual: row.dim(),
            });
        }

        let binarized;
        let row = match self.binarize {
            Some(threshold) => {
                binarized = SparseRow::from_pairs(
                    row.dim(),
                    row.iter().filter(|&(_, v)| v > threshold).map(|(col, _)| (col, 1.0)),
                )?;
                &binarized
            }
            None => row,
        };

        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(weights, bias)| -> Result<f64> { Ok(row.dot(weights)? + bias) })
            .collect()
    }
}

impl Classifier for NaiveBayes {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn predict(&self, row: &SparseRow) -> Result<i64> {
        let jll = self.joint_log_likelihood(row)?;
        // First maximum wins on ties
        let best = jll
            .iter()
            .enumerate()
            .fold(0, |best, (i, &v)| if v > jll[best] { i } else { best });
        Ok(self.classes[best])
    }

    fn predict_proba(&self, row: &SparseRow) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(row)?;
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        Ok(jll.iter().map(|v| (v - log_norm).exp()).collect())
    }
}
