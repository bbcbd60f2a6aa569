//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Implementations are
//! statically dispatched; the provided zero-sized defaults implement
//! standard TextRank.

use tracing::debug;

use crate::error::Result;
use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::nlp::resource::ensure_initialized_with;
use crate::nlp::segmenter::Segmenter;
use crate::nlp::tokenizer::TermTokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::summarizer::selector::{SummaryResult, TopKSelector};
use crate::summarizer::term_vector::TermVectorBuilder;
use crate::types::{Sentence, TextRankConfig};

// ============================================================================
// SentenceSegmenter: raw text to sentences (stage 1)
// ============================================================================

/// Splits the document into ordered sentences.
///
/// # Contract
///
/// - **Output**: trimmed, non-empty sentences with ascending `index` and
///   non-overlapping byte ranges.
/// - Empty or whitespace-only input fails with
///   [`SummaryError::EmptyInput`](crate::SummaryError::EmptyInput).
pub trait SentenceSegmenter {
    fn segment(&self, text: &str, cfg: &TextRankConfig) -> Result<Vec<Sentence>>;
}

/// UAX #29 segmentation refined by the process-wide abbreviation resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment(&self, text: &str, cfg: &TextRankConfig) -> Result<Vec<Sentence>> {
        let resource = ensure_initialized_with(cfg.abbreviations_path.as_deref())?;
        Segmenter::new(&resource).split(text)
    }
}

// ============================================================================
// SimilarityGraphBuilder: sentences to weighted graph (stage 2)
// ============================================================================

/// Builds the undirected sentence similarity graph.
///
/// # Contract
///
/// - One node per sentence, node id = sentence index.
/// - Symmetric non-negative weights, no self-loops, zero edges omitted.
/// - Deterministic for identical input.
pub trait SimilarityGraphBuilder {
    fn build(&self, sentences: &[Sentence], cfg: &TextRankConfig) -> CsrGraph;
}

/// Term-based similarity graph using the measure selected in the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermSimilarityGraphBuilder;

impl SimilarityGraphBuilder for TermSimilarityGraphBuilder {
    fn build(&self, sentences: &[Sentence], cfg: &TextRankConfig) -> CsrGraph {
        let vectors = TermVectorBuilder::new(TermTokenizer::from_config(cfg)).build_all(sentences);
        let builder = build_graph_parallel(&vectors, cfg.similarity, cfg.parallel_threshold);
        debug!(
            nodes = builder.node_count(),
            edges = builder.edge_count(),
            similarity = cfg.similarity.as_str(),
            "similarity graph built"
        );
        CsrGraph::from_builder(&builder)
    }
}

// ============================================================================
// Ranker: graph to score vector (stage 3)
// ============================================================================

/// Scores every node of the graph.
///
/// # Contract
///
/// - One non-negative score per node; terminates in bounded time.
/// - A zero-node graph fails with
///   [`SummaryError::EmptyGraph`](crate::SummaryError::EmptyGraph).
pub trait Ranker {
    fn rank(&self, graph: &CsrGraph, cfg: &TextRankConfig) -> Result<PageRankResult>;
}

/// Weighted PageRank with the config's damping, tolerance and iteration cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRankRanker;

impl Ranker for PageRankRanker {
    fn rank(&self, graph: &CsrGraph, cfg: &TextRankConfig) -> Result<PageRankResult> {
        StandardPageRank::from_config(cfg).run(graph)
    }
}

// ============================================================================
// SummarySelector: scores to summary (stage 4)
// ============================================================================

/// Chooses which sentences make up the summary.
///
/// # Contract
///
/// - Returns `min(k, N)` sentences in document order.
pub trait SummarySelector {
    fn select(
        &self,
        sentences: &[Sentence],
        rank: &PageRankResult,
        k: usize,
    ) -> Result<SummaryResult>;
}

impl SummarySelector for TopKSelector {
    fn select(
        &self,
        sentences: &[Sentence],
        rank: &PageRankResult,
        k: usize,
    ) -> Result<SummaryResult> {
        TopKSelector::select(self, sentences, rank, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimilarityMeasure;
    use crate::SummaryError;

    fn cfg() -> TextRankConfig {
        TextRankConfig::default()
    }

    #[test]
    fn test_unicode_segmenter_splits() {
        let sentences = UnicodeSentenceSegmenter
            .segment("One fish. Two fish.", &cfg())
            .unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text, "Two fish.");
    }

    #[test]
    fn test_unicode_segmenter_rejects_blank() {
        let err = UnicodeSentenceSegmenter.segment("   ", &cfg()).unwrap_err();
        assert!(matches!(err, SummaryError::EmptyInput));
    }

    #[test]
    fn test_unicode_segmenter_reports_missing_abbreviation_file() {
        UnicodeSentenceSegmenter.segment("Warm up. Go.", &cfg()).unwrap();

        let missing = TextRankConfig {
            abbreviations_path: Some("/definitely/missing/abbrev.txt".into()),
            ..cfg()
        };
        let err = UnicodeSentenceSegmenter.segment("Warm up. Go.", &missing).unwrap_err();
        assert!(matches!(err, SummaryError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_graph_builder_one_node_per_sentence() {
        let sentences = UnicodeSentenceSegmenter
            .segment(
                "Cats are mammals. Dogs are mammals too. The sky is blue.",
                &cfg(),
            )
            .unwrap();
        let graph = TermSimilarityGraphBuilder.build(&sentences, &cfg());

        assert_eq!(graph.num_nodes, 3);
        assert_eq!(graph.dangling_nodes(), vec![2]);
    }

    #[test]
    fn test_graph_builder_respects_measure() {
        let sentences = vec![
            Sentence::new("alpha beta", 0, 10, 0),
            Sentence::new("alpha gamma", 11, 22, 1),
        ];
        let cosine = TextRankConfig {
            similarity: SimilarityMeasure::Cosine,
            ..cfg()
        };
        let graph = TermSimilarityGraphBuilder.build(&sentences, &cosine);
        let (_, weight) = graph.neighbors(0).next().unwrap();
        assert!((weight - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pagerank_ranker_uses_config() {
        let graph = CsrGraph::from_builder(&crate::graph::builder::GraphBuilder::with_nodes(2));
        let strict = TextRankConfig {
            max_iterations: 1,
            ..cfg()
        };
        let result = PageRankRanker.rank(&graph, &strict).unwrap();
        assert_eq!(result.iterations, 1);
    }
}
