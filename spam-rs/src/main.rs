//! spam-rs: Spam classification service
//!
//! Loads the pretrained artifacts once and serves `POST /predict`.

use clap::Parser;
use spam_rs::api::ApiServer;
use spam_rs::{logging, Config, SpamClassifier};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Spam/ham email classification service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); development defaults when omitted
    #[arg(short, long, env = "SPAM_RS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address (e.g., 0.0.0.0:5000)
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::development(),
    };
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }
    config.validate()?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));
    match &cli.config {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No config file specified, using development defaults"),
    }

    // Artifacts are loaded once; failure is fatal
    let classifier = SpamClassifier::from_config(&config).map_err(|e| {
        error!("Failed to load model artifacts: {}", e);
        e
    })?;

    let server = ApiServer::new(classifier, &config.server)?;
    server.run().await?;

    Ok(())
}
