#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use intake_config::{Config, ExtractorKind};
use intake_core::{Extract, Pipeline, RunState};
use intake_extraction::PatternExtractor;
use intake_providers::ChatExtractor;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Document field-intake pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one document and print the status report
    Process {
        /// Document text (reads stdin when neither text nor --file given)
        document: Option<String>,

        /// Read the document from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the full run result as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in walkthrough scenarios
    Demo,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            document,
            file,
            json,
        } => {
            let config = Config::load_or_default()?;
            let pipeline = build_pipeline(&config)?;

            let doc = read_document(document, file)?;
            let state = pipeline.process(&doc).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&run_json(&state))?);
            } else {
                println!("{}", state.response);
            }
        }
        Commands::Demo => {
            run_demo().await?;
        }
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Version => {
            println!("intake {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Build the pipeline with the configured extractor implementation.
fn build_pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    let extractor: Arc<dyn Extract> = match config.extractor {
        ExtractorKind::Pattern => {
            let extractor = PatternExtractor::new(config.extraction.clone())
                .map_err(|e| anyhow::anyhow!("Failed to compile extraction rules: {e}"))?;
            Arc::new(extractor)
        }
        ExtractorKind::Chat => {
            anyhow::ensure!(
                !config.provider.api_key.is_empty(),
                "Chat extractor selected but provider.api_key is empty. \
                 Edit {} or switch extractor to \"pattern\".",
                Config::config_path()?.display()
            );
            info!("Using chat extractor: model={}", config.provider.model);
            Arc::new(
                ChatExtractor::new(
                    config.provider.api_key.clone(),
                    config.provider.model.clone(),
                )
                .with_base_url(config.provider.base_url.clone()),
            )
        }
    };

    Ok(Pipeline::new(
        extractor,
        config.pipeline.required_fields.clone(),
    ))
}

fn read_document(document: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if let Some(text) = document {
        return Ok(text);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn run_json(state: &RunState) -> serde_json::Value {
    serde_json::json!({
        "extracted_fields": state.extracted,
        "validation_outcome": state.outcome,
        "response_text": state.response,
        "error": state.error.as_ref().map(ToString::to_string),
    })
}

/// Walk the shipped scenario documents through the pattern pipeline.
async fn run_demo() -> anyhow::Result<()> {
    let scenarios = [
        "Acme needs a campaign with a budget of 10000 and a deadline of 2025-09-01.",
        "Acme needs a campaign with a budget of 10000.",
        "Acme needs a campaign with a deadline of 2025-09-01.",
        "A campaign with a budget of 10000 and a deadline of 2025-09-01.",
        "A campaign is needed.",
    ];

    let extractor = PatternExtractor::with_defaults()
        .map_err(|e| anyhow::anyhow!("Failed to compile extraction rules: {e}"))?;
    let pipeline = Pipeline::new(extractor, intake_core::FieldName::ALL.to_vec());

    for (i, doc) in scenarios.iter().enumerate() {
        println!("{}", "=".repeat(60));
        println!("SCENARIO {}", i + 1);
        println!("{}", "=".repeat(60));
        println!("Input: {doc}");

        let state = pipeline.process(doc).await;

        println!();
        println!(
            "Extracted fields: {}",
            serde_json::to_string(&state.extracted)?
        );
        println!(
            "Missing fields: {:?}",
            state
                .missing_fields()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
        );
        println!();
        println!("{}", state.response);
        println!();
    }

    Ok(())
}
