//! CLI tool for classifying a single email offline
//!
//! Uses the same artifacts and pipeline as the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Classify a message
//! spam-check --config spam-rs.toml --subject "FREE" --body "Win cash now!!!"
//!
//! # Read the body from stdin and show the feature breakdown
//! cat message.txt | spam-check --subject "Hello" --body - --explain
//!
//! # Machine-readable output
//! spam-check --subject "Invoice" --body "See attached" --json
//! ```

use anyhow::Context;
use clap::Parser;
use spam_rs::{logging, Config, RawEmail, SpamClassifier};
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "spam-check")]
#[command(about = "Classify one email as SPAM or HAM", long_about = None)]
struct Cli {
    /// Configuration file (TOML); development defaults when omitted
    #[arg(short, long, env = "SPAM_RS_CONFIG")]
    config: Option<PathBuf>,

    /// Subject line
    #[arg(short, long, default_value = "")]
    subject: String,

    /// Body text, or "-" to read it from stdin
    #[arg(short, long, default_value = "")]
    body: String,

    /// Print the intermediate features
    #[arg(short, long)]
    explain: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::development(),
    };
    config.validate()?;

    // Logs go to stderr so stdout stays parseable
    logging::init_stderr(&config.logging)?;

    let classifier =
        SpamClassifier::from_config(&config).context("Failed to load model artifacts")?;
    debug!(features = classifier.row_width(), "Loaded classifier");

    let body = read_body(cli.body, std::io::stdin().lock())?;
    let email = RawEmail::new(cli.subject, body);

    print!("{}", render(&classifier, &email, cli.explain, cli.json)?);
    Ok(())
}

/// The body argument itself, or all of `stdin` when it is "-"
fn read_body(arg: String, mut stdin: impl Read) -> anyhow::Result<String> {
    if arg != "-" {
        return Ok(arg);
    }

    let mut body = String::new();
    stdin
        .read_to_string(&mut body)
        .context("Failed to read body from stdin")?;
    Ok(body)
}

/// Classify `email` and format the result for stdout
fn render(
    classifier: &SpamClassifier,
    email: &RawEmail,
    explain: bool,
    json: bool,
) -> anyhow::Result<String> {
    let mut out = String::new();

    if explain {
        let (prediction, breakdown) = classifier.explain(email)?;
        if json {
            let output = serde_json::json!({
                "prediction": prediction,
                "features": breakdown,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            writeln!(out, "Label:                 {}", prediction.label)?;
            writeln!(out, "Spam probability:      {:.2}%", prediction.probability)?;
            writeln!(out, "Clean text:            {}", breakdown.clean_text)?;
            writeln!(out, "Tokens:                {}", breakdown.tokens.len())?;
            writeln!(out, "Text features set:     {}", breakdown.text_nnz)?;
            writeln!(
                out,
                "Suspicious word ratio: {:.4}",
                breakdown.raw.suspicious_word_ratio
            )?;
            writeln!(
                out,
                "Suspicious char ratio: {:.4}",
                breakdown.raw.suspicious_char_ratio
            )?;
            writeln!(out, "Scaled ratios:         {:?}", breakdown.scaled)?;
        }
    } else {
        let prediction = classifier.classify(email)?;
        if json {
            writeln!(out, "{}", serde_json::to_string(&prediction)?)?;
        } else {
            writeln!(out, "{} ({:.2}%)", prediction.label, prediction.probability)?;
        }
    }

    Ok(out)
}
