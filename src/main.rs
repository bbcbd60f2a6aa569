//! # rapid-summarize
//!
//! Command-line front end for the extractive summarizer.
//!
//! ```bash
//! # Three sentences from a file
//! rapid-summarize article.txt -n 3
//!
//! # From stdin, with a JSON config and structured output
//! cat article.txt | rapid-summarize - --config summarize.json --json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=rapid_summarizer=debug` for stage details.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rapid_summarizer::{
    Summarizer, SimilarityMeasure, SummaryMethod, SummaryRequest, TextRankConfig,
};

/// Extractive TextRank summarization.
#[derive(Parser)]
#[command(name = "rapid-summarize", version, about)]
struct Cli {
    /// Input file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Number of sentences to keep. Overrides the config file.
    #[arg(short = 'n', long = "sentences")]
    sentences: Option<usize>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Similarity measure (`log_overlap` or `cosine`). Overrides the config file.
    #[arg(long)]
    similarity: Option<SimilarityMeasure>,

    /// Keep stop words when comparing sentences.
    #[arg(long)]
    keep_stopwords: bool,

    /// Print the full response as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            TextRankConfig::from_json_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => TextRankConfig::default(),
    };
    if let Some(similarity) = cli.similarity {
        config.similarity = similarity;
    }
    if cli.keep_stopwords {
        config.remove_stopwords = false;
    }
    let num_sentences = cli.sentences.unwrap_or(config.num_sentences);

    let text = read_input(&cli.input)?;

    let service = Summarizer::new(config)?;
    let request = SummaryRequest::new(text, SummaryMethod::extractive(num_sentences));
    let response = service.summarize(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.summary);
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
