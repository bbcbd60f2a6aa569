//! Standard PageRank algorithm
//!
//! Implements weighted PageRank with power iteration and proper
//! handling of dangling nodes.

use tracing::{debug, warn};

use super::PageRankResult;
use crate::error::{Result, SummaryError};
use crate::graph::csr::CsrGraph;
use crate::types::TextRankConfig;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the L1 delta
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-4,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration cap and tolerance from `cfg`
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self {
            damping: cfg.damping,
            max_iterations: cfg.max_iterations,
            tolerance: cfg.tolerance,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a graph from uniform initial scores
    ///
    /// Returns the result even if convergence wasn't achieved, with
    /// `converged=false`. Fails only on a graph with no nodes.
    pub fn run(&self, graph: &CsrGraph) -> Result<PageRankResult> {
        let n = graph.num_nodes;
        if n == 0 {
            return Err(SummaryError::EmptyGraph);
        }
        self.iterate(graph, vec![1.0 / n as f64; n])
    }

    /// Run PageRank starting from the given scores
    ///
    /// `initial` must have one entry per node; it is renormalized to sum 1.
    pub fn run_from(&self, graph: &CsrGraph, initial: &[f64]) -> Result<PageRankResult> {
        let n = graph.num_nodes;
        if n == 0 {
            return Err(SummaryError::EmptyGraph);
        }
        if initial.len() != n {
            return Err(SummaryError::invalid_parameter(
                "initial",
                format!("expected {n} scores, got {}", initial.len()),
            ));
        }

        let mut scores = initial.to_vec();
        normalize(&mut scores);
        self.iterate(graph, scores)
    }

    fn iterate(&self, graph: &CsrGraph, mut scores: Vec<f64>) -> Result<PageRankResult> {
        let n = graph.num_nodes;
        let mut new_scores = vec![0.0; n];

        // Dangling nodes spread their mass uniformly so the total stays at 1
        let dangling_nodes = graph.dangling_nodes();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.tolerance {
            iterations += 1;

            // Calculate dangling mass
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            // Reset new scores
            new_scores.fill(teleport + dangling_contribution);

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        let contribution = self.damping * node_score * weight / total_weight;
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Normalize scores (they should already sum to ~1, but ensure numerical stability)
        normalize(&mut scores);

        let converged = delta <= self.tolerance;
        if converged {
            debug!(nodes = n, iterations, delta, "pagerank converged");
        } else {
            warn!(
                nodes = n,
                iterations, delta, "pagerank stopped at iteration cap before converging"
            );
        }

        Ok(PageRankResult::new(scores, iterations, delta, converged))
    }
}

fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}
