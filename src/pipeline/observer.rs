//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::summarizer::selector::SummaryResult;
use crate::types::Sentence;

pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Metrics reported when a stage finishes.
///
/// Only the fields relevant to a stage are set.
#[derive(Debug, Clone, Default)]
pub struct StageReport {
    duration: Duration,
    sentences: Option<usize>,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn sentences(&self) -> Option<usize> {
        self.sentences
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    /// Undirected edge count.
    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    /// Final L1 delta of the power iteration.
    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Fluent construction of a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn sentences(mut self, n: usize) -> Self {
        self.report.sentences = Some(n);
        self
    }

    pub fn nodes(mut self, n: usize) -> Self {
        self.report.nodes = Some(n);
        self
    }

    pub fn edges(mut self, n: usize) -> Self {
        self.report.edges = Some(n);
        self
    }

    pub fn iterations(mut self, n: usize) -> Self {
        self.report.iterations = Some(n);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks invoked by [`Pipeline::run`](super::runner::Pipeline::run).
///
/// Every method has an empty default, so implementors override only what
/// they need. Artifact hooks fire after the producing stage ends; a stage
/// that fails fires neither its end hook nor its artifact hook.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
    fn on_sentences(&mut self, _sentences: &[Sentence]) {}
    fn on_graph(&mut self, _graph: &CsrGraph) {}
    fn on_rank(&mut self, _rank: &PageRankResult) {}
    fn on_summary(&mut self, _summary: &SummaryResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every completed stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for `stage`, if it completed.
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all recorded stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.duration()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder_sets_only_given_fields() {
        let report = StageReportBuilder::new(Duration::from_millis(2))
            .nodes(4)
            .edges(3)
            .build();

        assert_eq!(report.duration(), Duration::from_millis(2));
        assert_eq!(report.nodes(), Some(4));
        assert_eq!(report.edges(), Some(3));
        assert_eq!(report.iterations(), None);
        assert_eq!(report.sentences(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_SEGMENT, STAGE_GRAPH]);
        assert_eq!(obs.total(), Duration::from_millis(3));
        assert!(obs.report(STAGE_RANK).is_none());
    }
}
