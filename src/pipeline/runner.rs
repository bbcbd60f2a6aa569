//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of pipeline stages.
//! Calling [`Pipeline::run`] executes them in order, threading artifacts
//! between stages and notifying a [`PipelineObserver`] at each boundary.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler monomorphizes
//! each combination into a unique concrete type. The default stages are
//! zero-sized and add no runtime cost.
//!
//! # Factory methods
//!
//! Use [`Pipeline::textrank()`] to build the standard pipeline without
//! spelling out the generics manually.

use crate::error::Result;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_GRAPH, STAGE_RANK,
    STAGE_SEGMENT, STAGE_SELECT,
};
use crate::pipeline::traits::{
    PageRankRanker, Ranker, SentenceSegmenter, SimilarityGraphBuilder, SummarySelector,
    TermSimilarityGraphBuilder, UnicodeSentenceSegmenter,
};
use crate::summarizer::selector::{SummaryResult, TopKSelector};
use crate::types::TextRankConfig;

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Seg` | [`SentenceSegmenter`] | [`UnicodeSentenceSegmenter`] |
/// | `GB`  | [`SimilarityGraphBuilder`] | [`TermSimilarityGraphBuilder`] |
/// | `Rnk` | [`Ranker`] | [`PageRankRanker`] |
/// | `Sel` | [`SummarySelector`] | [`TopKSelector`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Seg, GB, Rnk, Sel> {
    pub segmenter: Seg,
    pub graph_builder: GB,
    pub ranker: Rnk,
    pub selector: Sel,
}

/// Type alias for the default TextRank pipeline.
pub type TextRankPipeline = Pipeline<
    UnicodeSentenceSegmenter,
    TermSimilarityGraphBuilder,
    PageRankRanker,
    TopKSelector,
>;

impl TextRankPipeline {
    /// Build a pipeline for standard extractive TextRank.
    ///
    /// - Unicode sentence segmentation with abbreviation merging
    /// - Term similarity graph (measure from the config)
    /// - Weighted PageRank
    /// - Top-k selection in document order
    pub fn textrank() -> Self {
        Pipeline {
            segmenter: UnicodeSentenceSegmenter,
            graph_builder: TermSimilarityGraphBuilder,
            ranker: PageRankRanker,
            selector: TopKSelector,
        }
    }
}

impl Default for TextRankPipeline {
    fn default() -> Self {
        Self::textrank()
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<Seg, GB, Rnk, Sel> Pipeline<Seg, GB, Rnk, Sel>
where
    Seg: SentenceSegmenter,
    GB: SimilarityGraphBuilder,
    Rnk: Ranker,
    Sel: SummarySelector,
{
    /// Execute the pipeline, producing a summary of `k` sentences.
    ///
    /// Stages run in order:
    /// 1. Segment text into sentences
    /// 2. Build the similarity graph
    /// 3. Rank sentences
    /// 4. Select the summary
    ///
    /// The first failing stage aborts the run; later stages never start.
    pub fn run(
        &self,
        text: &str,
        k: usize,
        cfg: &TextRankConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryResult> {
        // Stage 1: Segment
        let sentences = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences = self.segmenter.segment(text, cfg)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .sentences(sentences.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            observer.on_sentences(&sentences);
            sentences
        };

        // Stage 2: Build graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = self.graph_builder.build(&sentences, cfg);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes)
                .edges(graph.num_edges() / 2)
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        // Stage 3: Rank
        let rank_output = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let rank_output = self.ranker.rank(&graph, cfg)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(rank_output.iterations)
                .converged(rank_output.converged)
                .residual(rank_output.delta)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&rank_output);
            rank_output
        };

        // Stage 4: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let summary = self.selector.select(&sentences, &rank_output, k)?;
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_SELECT, &report);
        observer.on_summary(&summary);

        Ok(summary)
    }
}

// ============================================================================
// PipelineBuilder: fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the default TextRank stages and allows overriding
/// individual stages.
///
/// ```
/// # use rapid_summarizer::pipeline::runner::PipelineBuilder;
/// # use rapid_summarizer::pipeline::traits::*;
/// let pipeline = PipelineBuilder::new()
///     .ranker(PageRankRanker)
///     .build();
/// ```
pub struct PipelineBuilder<
    Seg = UnicodeSentenceSegmenter,
    GB = TermSimilarityGraphBuilder,
    Rnk = PageRankRanker,
    Sel = TopKSelector,
> {
    segmenter: Seg,
    graph_builder: GB,
    ranker: Rnk,
    selector: Sel,
}

impl PipelineBuilder {
    /// Start building from default TextRank stages.
    pub fn new() -> Self {
        PipelineBuilder {
            segmenter: UnicodeSentenceSegmenter,
            graph_builder: TermSimilarityGraphBuilder,
            ranker: PageRankRanker,
            selector: TopKSelector,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Seg, GB, Rnk, Sel> PipelineBuilder<Seg, GB, Rnk, Sel> {
    /// Override the segmenter stage.
    pub fn segmenter<S: SentenceSegmenter>(self, s: S) -> PipelineBuilder<S, GB, Rnk, Sel> {
        PipelineBuilder {
            segmenter: s,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: self.selector,
        }
    }

    /// Override the graph builder stage.
    pub fn graph_builder<G: SimilarityGraphBuilder>(self, g: G) -> PipelineBuilder<Seg, G, Rnk, Sel> {
        PipelineBuilder {
            segmenter: self.segmenter,
            graph_builder: g,
            ranker: self.ranker,
            selector: self.selector,
        }
    }

    /// Override the ranker stage.
    pub fn ranker<R: Ranker>(self, r: R) -> PipelineBuilder<Seg, GB, R, Sel> {
        PipelineBuilder {
            segmenter: self.segmenter,
            graph_builder: self.graph_builder,
            ranker: r,
            selector: self.selector,
        }
    }

    /// Override the selector stage.
    pub fn selector<S: SummarySelector>(self, s: S) -> PipelineBuilder<Seg, GB, Rnk, S> {
        PipelineBuilder {
            segmenter: self.segmenter,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: s,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<Seg, GB, Rnk, Sel> {
        Pipeline {
            segmenter: self.segmenter,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: self.selector,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
