//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Node ids are sentence
//! indices.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::summarizer::term_vector::TermVector;
use crate::types::SimilarityMeasure;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable undirected graph builder
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `n` isolated nodes, ids `0..n`
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); n],
        }
    }

    /// Append an isolated node, returning its ID
    pub fn add_node(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(BuilderNode::default());
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// Self-loops, unknown nodes and non-positive weights are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to || weight <= 0.0 || !weight.is_finite() {
            return;
        }
        if from as usize >= self.nodes.len() || to as usize >= self.nodes.len() {
            return;
        }

        // Add edge in both directions (undirected graph)
        *self.nodes[from as usize].edges.entry(to).or_insert(0.0) += weight;
        *self.nodes[to as usize].edges.entry(from).or_insert(0.0) += weight;
    }

    /// Build the sentence similarity graph sequentially
    pub fn from_term_vectors(vectors: &[TermVector], measure: SimilarityMeasure) -> Self {
        let rows: Vec<Vec<(u32, f64)>> = (0..vectors.len())
            .map(|i| similarity_row(vectors, i, measure))
            .collect();
        Self::from_rows(vectors.len(), rows)
    }

    fn from_rows(n: usize, rows: Vec<Vec<(u32, f64)>>) -> Self {
        let mut builder = Self::with_nodes(n);
        for (i, row) in rows.into_iter().enumerate() {
            for (j, weight) in row {
                builder.increment_edge(i as u32, j, weight);
            }
        }
        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Weight of the edge between `a` and `b` (0.0 if absent)
    pub fn weight(&self, a: u32, b: u32) -> f64 {
        self.get_node(a)
            .and_then(|n| n.edges.get(&b).copied())
            .unwrap_or(0.0)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Non-zero similarities between sentence `i` and every later sentence
fn similarity_row(vectors: &[TermVector], i: usize, measure: SimilarityMeasure) -> Vec<(u32, f64)> {
    ((i + 1)..vectors.len())
        .filter_map(|j| {
            let weight = measure.similarity(&vectors[i], &vectors[j]);
            (weight > 0.0).then_some((j as u32, weight))
        })
        .collect()
}

/// Build the sentence similarity graph, scoring pairs in parallel for
/// large documents
///
/// Rows are collected in sentence order, so the result is identical to
/// [`GraphBuilder::from_term_vectors`].
pub fn build_graph_parallel(
    vectors: &[TermVector],
    measure: SimilarityMeasure,
    parallel_threshold: usize,
) -> GraphBuilder {
    // For small documents, sequential is faster
    if vectors.len() < parallel_threshold {
        return GraphBuilder::from_term_vectors(vectors, measure);
    }

    debug!(sentences = vectors.len(), "scoring sentence pairs in parallel");
    let rows: Vec<Vec<(u32, f64)>> = (0..vectors.len())
        .into_par_iter()
        .map(|i| similarity_row(vectors, i, measure))
        .collect();

    GraphBuilder::from_rows(vectors.len(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(sentences: &[&[&str]]) -> Vec<TermVector> {
        sentences
            .iter()
            .map(|terms| TermVector::from_terms(terms.iter().copied()))
            .collect()
    }

    fn mammals() -> Vec<TermVector> {
        vectors(&[
            &["cats", "are", "mammals"],
            &["dogs", "are", "mammals", "too"],
            &["the", "sky", "is", "blue"],
            &["mammals", "have", "fur"],
        ])
    }

    #[test]
    fn test_edge_incrementing() {
        let mut builder = GraphBuilder::with_nodes(2);

        builder.increment_edge(0, 1, 1.0);
        builder.increment_edge(0, 1, 1.0);

        // Should have weight 2.0 in both directions
        assert_eq!(builder.weight(0, 1), 2.0);
        assert_eq!(builder.weight(1, 0), 2.0);
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id = builder.add_node();

        builder.increment_edge(id, id, 1.0);

        let node = builder.get_node(id).unwrap();
        assert!(node.edges.is_empty());
    }

    #[test]
    fn test_zero_weight_edges_omitted() {
        let mut builder = GraphBuilder::with_nodes(2);
        builder.increment_edge(0, 1, 0.0);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_similarity_graph_is_symmetric() {
        let builder = GraphBuilder::from_term_vectors(&mammals(), SimilarityMeasure::LogOverlap);

        assert_eq!(builder.node_count(), 4);
        for (i, node) in builder.nodes() {
            for (&j, &w) in &node.edges {
                assert!(w > 0.0);
                assert_eq!(builder.weight(j, i), w);
            }
        }
    }

    #[test]
    fn test_unrelated_sentence_is_isolated() {
        let builder = GraphBuilder::from_term_vectors(&mammals(), SimilarityMeasure::LogOverlap);

        assert!(builder.get_node(2).unwrap().edges.is_empty());
        assert!(builder.weight(0, 1) > builder.weight(0, 3));
        // 0-1, 0-3, 1-3
        assert_eq!(builder.edge_count(), 3);
    }

    #[test]
    fn test_single_sentence_has_no_edges() {
        let builder = GraphBuilder::from_term_vectors(
            &vectors(&[&["only", "one", "sentence"]]),
            SimilarityMeasure::Cosine,
        );
        assert_eq!(builder.node_count(), 1);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vecs = mammals();
        let sequential = GraphBuilder::from_term_vectors(&vecs, SimilarityMeasure::LogOverlap);
        let parallel = build_graph_parallel(&vecs, SimilarityMeasure::LogOverlap, 0);

        assert_eq!(sequential.node_count(), parallel.node_count());
        for i in 0..4u32 {
            for j in 0..4u32 {
                assert_eq!(sequential.weight(i, j), parallel.weight(i, j));
            }
        }
    }
}
