//! Integration tests for the classification pipeline over exported artifacts

use spam_rs::config::{Config, ModelConfig};
use spam_rs::model::ModelArtifacts;
use spam_rs::spam::{Label, RawEmail, SpamClassifier};
use spam_rs::SpamError;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn fixture_config() -> Config {
    let mut config = Config::development();
    config.model = ModelConfig {
        vectorizer_path: fixture("tfidf_vectorizer.json"),
        scaler_path: fixture("scaler.json"),
        classifier_path: fixture("naive_bayes_model.json"),
        lexicon_path: None,
    };
    config
}

#[test]
fn test_load_fixture_artifacts() {
    let artifacts = ModelArtifacts::load(&fixture_config().model).unwrap();
    assert_eq!(artifacts.vectorizer.num_features(), 24);
    assert_eq!(artifacts.scaler.num_features(), 2);
    assert_eq!(artifacts.row_width(), 26);
    assert_eq!(artifacts.classifier.classes(), &[0, 1]);
}

#[test]
fn test_classify_spam() {
    let classifier = SpamClassifier::from_config(&fixture_config()).unwrap();
    let email = RawEmail::new(
        "URGENT: claim your FREE prize",
        "Click here to win cash now!!! Verify your account.",
    );

    let prediction = classifier.classify(&email).unwrap();
    assert_eq!(prediction.label, Label::Spam);
    assert!(prediction.probability > 99.0);
}

#[test]
fn test_classify_ham() {
    let classifier = SpamClassifier::from_config(&fixture_config()).unwrap();
    let email = RawEmail::new(
        "Project meeting tomorrow",
        "Please review the report before the team meeting.",
    );

    let prediction = classifier.classify(&email).unwrap();
    assert_eq!(prediction.label, Label::Ham);
    assert!(prediction.probability < 1.0);
}

#[test]
fn test_classify_empty_email() {
    let classifier = SpamClassifier::from_config(&fixture_config()).unwrap();
    let prediction = classifier.classify(&RawEmail::default()).unwrap();

    assert_eq!(prediction.label, Label::Ham);
    assert!((0.0..=100.0).contains(&prediction.probability));
}

#[test]
fn test_explain_breakdown() {
    let classifier = SpamClassifier::from_config(&fixture_config()).unwrap();
    let (prediction, breakdown) = classifier
        .explain(&RawEmail::new("FREE", "Win cash now!!!"))
        .unwrap();

    assert_eq!(prediction.label, Label::Spam);
    assert_eq!(breakdown.tokens.as_slice(), &["free", "win", "cash"]);
    assert!((breakdown.raw.suspicious_word_ratio - 0.6).abs() < 1e-12);
    assert!((breakdown.raw.suspicious_char_ratio - 0.6).abs() < 1e-12);
    assert_eq!(breakdown.text_nnz, 3);
    assert_eq!(breakdown.scaled.len(), 2);
}

#[test]
fn test_lexicon_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon = dir.path().join("lemmas.txt");
    std::fs::write(&lexicon, "prize\noffer\naccount\n").unwrap();

    let mut config = fixture_config();
    config.model.lexicon_path = Some(lexicon);

    let classifier = SpamClassifier::from_config(&config).unwrap();
    let (_, breakdown) = classifier
        .explain(&RawEmail::new("Prizes", "Offers for accounts"))
        .unwrap();
    assert_eq!(breakdown.clean_text, "prize offer account");
}

#[test]
fn test_missing_lexicon_is_config_error() {
    let mut config = fixture_config();
    config.model.lexicon_path = Some(PathBuf::from("/nonexistent/lemmas.txt"));
    let err = SpamClassifier::from_config(&config).unwrap_err();
    assert!(matches!(err, SpamError::Config(_)));
}

#[test]
fn test_malformed_artifact_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("scaler.json");
    std::fs::write(&broken, r#"{"kind": "standard", "mean": [0.0], "scale": [1.0, 1.0]}"#).unwrap();

    let mut config = fixture_config();
    config.model.scaler_path = broken;

    let err = SpamClassifier::from_config(&config).unwrap_err();
    assert!(matches!(err, SpamError::Artifact(_)));
}

#[test]
fn test_inconsistent_artifacts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let narrow = dir.path().join("tfidf_vectorizer.json");
    std::fs::write(&narrow, r#"{"vocabulary": {"cash": 0, "free": 1}, "idf": [1.0, 1.0]}"#).unwrap();

    let mut config = fixture_config();
    config.model.vectorizer_path = narrow;

    let err = SpamClassifier::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        SpamError::DimensionMismatch { expected: 4, actual: 26, .. }
    ));
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spam-rs.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[server]
listen_addr = "127.0.0.1:0"

[model]
vectorizer_path = "{}"
scaler_path = "{}"
classifier_path = "{}"

[logging]
format = "json"
"#,
            fixture("tfidf_vectorizer.json").display(),
            fixture("scaler.json").display(),
            fixture("naive_bayes_model.json").display(),
        ),
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    config.validate().unwrap();
    let classifier = SpamClassifier::from_config(&config).unwrap();
    assert_eq!(classifier.row_width(), 26);
}
