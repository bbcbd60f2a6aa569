//! Top-k sentence selection for summarization
//!
//! Picks the highest-scoring sentences and restores document order so the
//! summary reads in the same sequence as the source.

use serde::Serialize;

use crate::error::{Result, SummaryError};
use crate::pagerank::PageRankResult;
use crate::types::Sentence;

/// A selected sentence with its scores
#[derive(Debug, Clone, Serialize)]
pub struct SelectedSentence {
    /// The sentence
    pub sentence: Sentence,
    /// Centrality score
    pub score: f64,
    /// Position in the score ranking (0 = best)
    pub rank: usize,
}

/// Result of sentence selection
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    /// Selected sentences in document order
    pub sentences: Vec<SelectedSentence>,
    /// Selected sentence texts joined by a single space
    pub text: String,
    /// Number of sentences in the source document
    pub total_sentences: usize,
    /// PageRank iterations spent
    pub iterations: usize,
    /// Whether PageRank converged within its iteration cap
    pub converged: bool,
}

impl SummaryResult {
    /// Number of selected sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Document indices of the selected sentences, ascending
    pub fn indices(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.sentence.index).collect()
    }
}

/// Top-k sentence selector
#[derive(Debug, Clone, Copy, Default)]
pub struct TopKSelector;

impl TopKSelector {
    /// Select the `k` best sentences (clamped to the sentence count)
    ///
    /// Ties are broken by original index, earlier first. The output is in
    /// document order regardless of score order.
    pub fn select(
        &self,
        sentences: &[Sentence],
        rank: &PageRankResult,
        k: usize,
    ) -> Result<SummaryResult> {
        if k == 0 {
            return Err(SummaryError::invalid_parameter(
                "num_sentences",
                "must be at least 1",
            ));
        }
        if rank.len() != sentences.len() {
            return Err(SummaryError::invalid_parameter(
                "scores",
                format!(
                    "expected {} scores, got {}",
                    sentences.len(),
                    rank.len()
                ),
            ));
        }

        let mut selected: Vec<SelectedSentence> = rank
            .top_n(k)
            .into_iter()
            .enumerate()
            .map(|(position, (node, score))| SelectedSentence {
                sentence: sentences[node as usize].clone(),
                score,
                rank: position,
            })
            .collect();

        // Sort by document order
        selected.sort_by_key(|s| s.sentence.index);

        let text = selected
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(SummaryResult {
            sentences: selected,
            text,
            total_sentences: sentences.len(),
            iterations: rank.iterations,
            converged: rank.converged,
        })
    }
}
