//! Command-line front end for the classification pipeline.
//!
//! Two subcommands mirror the two stages: `collect` snapshots a
//! document store into a line corpus, `classify` drives that corpus
//! through the remote classifier into a CSV of results.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classification::{
    collect_lines, driver, DirSource, OpenAiClassifier, RetryPolicy, RunConfig, Taxonomy,
};
use openai_client::OpenAIClient;

#[derive(Parser)]
#[command(name = "classify", about = "Line classification over a remote LLM", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect every line of every document in a directory into a corpus file
    Collect {
        /// Directory holding the source documents
        #[arg(long)]
        dir: PathBuf,

        /// Corpus file to write
        #[arg(long, default_value = "collected_lines.txt")]
        output: PathBuf,
    },

    /// Classify each non-blank corpus line into a CSV of (sentence, label)
    Classify {
        /// Input corpus, one sentence per line
        #[arg(long, default_value = "collected_lines.txt")]
        input: PathBuf,

        /// Output CSV (appended to if it already exists)
        #[arg(long, default_value = "classified_results.csv")]
        output: PathBuf,

        /// Chat model to use
        #[arg(long, default_value = "gpt-4o")]
        model: String,

        /// File with one label per line; defaults to the built-in
        /// Korean hate-speech taxonomy
        #[arg(long)]
        labels_file: Option<PathBuf>,

        /// Pause between requests, in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,

        /// Cool-down before the single rate-limit retry, in seconds
        #[arg(long, default_value_t = 20)]
        cooldown_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Collect { dir, output } => {
            let source = DirSource::new(&dir);
            let summary = collect_lines(&source, &output)
                .await
                .with_context(|| format!("collecting from {}", dir.display()))?;

            println!();
            println!(
                "{} collected {} lines from {} documents ({} skipped) into {}",
                "done:".bright_green().bold(),
                summary.lines_collected,
                summary.documents_read,
                summary.documents_skipped,
                output.display()
            );
        }
        Command::Classify {
            input,
            output,
            model,
            labels_file,
            delay_ms,
            cooldown_secs,
        } => {
            let taxonomy = match labels_file {
                Some(path) => {
                    let contents = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading labels from {}", path.display()))?;
                    Taxonomy::new(contents.lines().map(str::trim).filter(|l| !l.is_empty()))?
                }
                None => Taxonomy::korean_hate_speech(),
            };

            let client = OpenAIClient::from_env()?.with_timeout(Duration::from_secs(60));
            let classifier = OpenAiClassifier::new(client).with_model(model);
            let config = RunConfig::new()
                .with_request_delay(Duration::from_millis(delay_ms))
                .with_policy(RetryPolicy::new().with_cooldown(Duration::from_secs(cooldown_secs)));

            let summary = driver::run(&input, &output, &taxonomy, &classifier, &config).await?;

            println!();
            println!("{}", "=".repeat(50).bright_cyan());
            println!(
                "{} {} sentences classified",
                "done:".bright_green().bold(),
                summary.lines_processed
            );
            println!("results written to {}", summary.output_path.display());
            println!("{}", "=".repeat(50).bright_cyan());
        }
    }

    Ok(())
}
