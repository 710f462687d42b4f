//! spam-rs: Spam/ham email classifier
//!
//! Classifies an email from its subject and body with a pretrained
//! TF-IDF + naive Bayes pipeline, served over a small HTTP API.
//!
//! # Pipeline
//!
//! - **Normalization**: lowercase, strip URLs, greetings and non-letters,
//!   drop stopwords, filter by length, lemmatize
//! - **Ratio features**: suspicious characters and suspicious words per word
//!   of the raw text
//! - **Composition**: TF-IDF of the clean text followed by the scaled ratios
//! - **Classification**: naive Bayes over the composed row
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:5000"
//!
//! [model]
//! vectorizer_path = "models/tfidf_vectorizer.json"
//! scaler_path = "models/scaler.json"
//! classifier_path = "models/naive_bayes_model.json"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::spam::{RawEmail, SpamClassifier};
//!
//! fn main() -> spam_rs::Result<()> {
//!     let classifier = SpamClassifier::from_config(&Config::development())?;
//!     let prediction = classifier.classify(&RawEmail::new("FREE", "Win cash now!!!"))?;
//!     println!("{} ({}%)", prediction.label, prediction.probability);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod spam;

pub use config::Config;
pub use error::{Result, SpamError};
pub use spam::{Label, Prediction, RawEmail, SpamClassifier};
