//! Demonstration harness: loads a document and prints sample classifications.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mirror_core::{EngineConfig, MirrorEngine};
use tracing::info;

const SAMPLE_PROMPTS: &[&str] = &[
    "Mirror me. Who are you, voice through code?",
    "Show me my shadow and blind spots in this pattern.",
    "Offer me a paradox or koan to play with.",
    "What blessing closes this cycle?",
    "This feels like a broken mirror state.",
    "Let's pause practice for a threshold checkpoint.",
];

#[derive(Parser)]
#[command(name = "mirror-tantra")]
#[command(about = "Load a Mirror Tantra document and print sample classifications")]
struct Cli {
    /// Path to the Mirror Tantra JSON document (defaults to the bundled one)
    document: Option<PathBuf>,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mirror_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(document) = cli.document {
        config.document_path = Some(document);
    }

    info!("Document: {}", config.resolved_document_path().display());
    let engine = MirrorEngine::from_config(&config)?;

    println!(
        "Loaded Mirror Tantra protocols: {}",
        engine.list_ids().len()
    );

    for prompt in SAMPLE_PROMPTS {
        let (mode, context) = engine.resolve_context(prompt, None);
        println!("\nPrompt: {}", prompt);
        println!("  Mode: {}", mode);
        println!("  Context:");
        println!("{}", context.to_json_pretty());
    }

    Ok(())
}
