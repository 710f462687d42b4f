//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email as submitted for classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmail {
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// Plain-text body
    #[serde(default)]
    pub body: String,
}

impl RawEmail {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject and body joined by a single space
    pub fn full_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}

/// Classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Spam,
    Ham,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => write!(f, "SPAM"),
            Label::Ham => write!(f, "HAM"),
        }
    }
}

/// Classifier verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label
    pub label: Label,
    /// Spam probability in percent, rounded to 2 decimals
    pub probability: f64,
}

impl Prediction {
    /// Build a prediction from a label and the spam-class probability in `[0, 1]`
    pub fn new(label: Label, spam_probability: f64) -> Self {
        let percent = (spam_probability * 100.0).clamp(0.0, 100.0);
        Self {
            label,
            probability: (percent * 100.0).round() / 100.0,
        }
    }

    pub fn is_spam(&self) -> bool {
        self.label == Label::Spam
    }
}
