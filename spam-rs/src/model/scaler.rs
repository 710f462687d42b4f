//! Pretrained per-feature linear scaler

use serde::{Deserialize, Serialize};

use super::Scaler;
use crate::error::{Result, SpamError};

/// Affine scaler with parameters frozen at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl LinearScaler {
    /// Standardizing scaler
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self::Standard { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Read a scaler from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        let scaler: Self = serde_json::from_str(json)?;
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check that both parameter vectors agree and are usable
    pub fn validate(&self) -> Result<()> {
        let (offset, scale) = match self {
            Self::Standard { mean, scale } => (mean, scale),
            Self::MinMax { min, scale } => (min, scale),
        };

        if offset.len() != scale.len() {
            return Err(SpamError::DimensionMismatch {
                context: "scaler parameters",
                expected: scale.len(),
                actual: offset.len(),
            });
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(SpamError::Artifact("scaler parameters must be finite".to_string()));
        }
        if let Self::Standard { scale, .. } = self {
            if scale.iter().any(|&s| s == 0.0) {
                return Err(SpamError::Artifact("standard scaler has a zero scale".to_string()));
            }
        }
        Ok(())
    }
}

impl Scaler for LinearScaler {
    fn transform(&self, sample: &[f64]) -> Result<Vec<f64>> {
        if sample.len() != self.num_features() {
            return Err(SpamError::DimensionMismatch {
                context: "scaler input",
                expected: self.num_features(),
                actual: sample.len(),
            });
        }

        if sample.iter().any(|x| !x.is_finite()) {
            return Err(SpamError::InvalidInput(format!(
                "non-finite scaler input {:?}",
                sample
            )));
        }

        let scaled = match self {
            Self::Standard { mean, scale } => sample
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            Self::MinMax { min, scale } => sample
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }

    fn num_features(&self) -> usize {
        match self {
            Self::Standard { scale, .. } | Self::MinMax { scale, .. } => scale.len(),
        }
    }
}
