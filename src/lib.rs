//! # rapid_summarizer
//!
//! Extractive text summarization with TextRank.
//!
//! The text is split into sentences, each sentence becomes a node in an
//! undirected similarity graph, weighted PageRank scores the nodes, and the
//! top-k sentences are returned in their original order. An abstractive
//! summarizer can be attached through [`NeuralSummarizer`].
//!
//! ## Quick start
//!
//! ```
//! let text = "Cats are mammals. Dogs are mammals too. The sky is blue. Mammals have fur.";
//! let summary = rapid_summarizer::summarize(text, 2).unwrap();
//! assert!(summary.contains("mammals"));
//! ```
//!
//! For structured output, or to run the neural method, use [`Summarizer`]:
//!
//! ```
//! use rapid_summarizer::{Summarizer, SummaryMethod, SummaryRequest, TextRankConfig};
//!
//! let service = Summarizer::new(TextRankConfig::default()).unwrap();
//! let request = SummaryRequest::new("One idea. Another idea.", SummaryMethod::extractive(1));
//! let response = service.summarize(&request).unwrap();
//! assert_eq!(response.extractive.unwrap().len(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod neural;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod service;
pub mod summarizer;
pub mod types;

pub use error::{Result, SummaryError};
pub use neural::{NeuralError, NeuralParams, NeuralSummarizer};
pub use nlp::resource::{ensure_initialized, ensure_initialized_with};
pub use pipeline::error_code::ErrorCode;
pub use service::{Summarizer, SummaryMethod, SummaryRequest, SummaryResponse};
pub use summarizer::selector::SummaryResult;
pub use types::{Sentence, SimilarityMeasure, TextRankConfig};

use pipeline::observer::NoopObserver;
use pipeline::runner::TextRankPipeline;

/// Summarize `text` into at most `num_sentences` sentences using defaults
pub fn summarize(text: &str, num_sentences: usize) -> Result<String> {
    summarize_with_config(text, num_sentences, &TextRankConfig::default())
}

/// Summarize with an explicit configuration
///
/// The configuration is validated first; warnings are logged.
pub fn summarize_with_config(
    text: &str,
    num_sentences: usize,
    config: &TextRankConfig,
) -> Result<String> {
    let config = config.clone().validated()?;
    let result = TextRankPipeline::textrank().run(text, num_sentences, &config, &mut NoopObserver)?;
    Ok(result.text)
}
