//! Term vector representation for sentences
//!
//! Builds sparse term-frequency vectors of sentences for the pairwise
//! similarity measures used as graph edge weights.

use rustc_hash::FxHashMap;

use crate::nlp::tokenizer::TermTokenizer;
use crate::types::{Sentence, SimilarityMeasure};

/// A sparse term-frequency vector for one sentence
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    /// Non-zero dimensions: term -> occurrence count
    pub counts: FxHashMap<String, usize>,
    /// Total number of term occurrences
    pub total: usize,
    /// L2 norm of the count vector
    pub norm: f64,
}

impl TermVector {
    /// Create a new empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a list of terms (duplicates increase the count)
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut total = 0;
        for term in terms {
            *counts.entry(term.into()).or_insert(0) += 1;
            total += 1;
        }
        let norm = Self::compute_norm(&counts);
        Self {
            counts,
            total,
            norm,
        }
    }

    /// Compute L2 norm
    fn compute_norm(counts: &FxHashMap<String, usize>) -> f64 {
        counts
            .values()
            .map(|&c| (c * c) as f64)
            .sum::<f64>()
            .sqrt()
    }

    /// Number of distinct terms
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `term`
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Sum over shared terms of `count_self * count_other`
    ///
    /// Equivalent to counting, for every term occurrence here, its
    /// occurrences in `other`.
    pub fn overlap(&self, other: &TermVector) -> f64 {
        // Iterate the smaller map; the product is symmetric.
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .counts
            .iter()
            .map(|(term, &c)| (c * large.count(term)) as f64)
            .sum()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.overlap(other) / (self.norm * other.norm)
    }

    /// Shared terms normalized by `ln|self| + ln|other|`
    ///
    /// Zero when either side has fewer than two distinct terms, which keeps
    /// the denominator strictly positive.
    pub fn log_overlap_similarity(&self, other: &TermVector) -> f64 {
        if self.distinct() < 2 || other.distinct() < 2 {
            return 0.0;
        }
        let overlap = self.overlap(other);
        if overlap == 0.0 {
            return 0.0;
        }
        overlap / ((self.total as f64).ln() + (other.total as f64).ln())
    }
}

impl SimilarityMeasure {
    /// Score a pair of sentences; symmetric and non-negative.
    pub fn similarity(&self, a: &TermVector, b: &TermVector) -> f64 {
        match self {
            Self::LogOverlap => a.log_overlap_similarity(b),
            Self::Cosine => a.cosine_similarity(b),
        }
    }
}

/// Build term vectors for sentences
#[derive(Debug, Clone, Default)]
pub struct TermVectorBuilder {
    tokenizer: TermTokenizer,
}

impl TermVectorBuilder {
    /// Create a builder around a tokenizer
    pub fn new(tokenizer: TermTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Build a term vector for one sentence
    pub fn build_sentence_vector(&self, sentence: &Sentence) -> TermVector {
        TermVector::from_terms(self.tokenizer.terms(&sentence.text))
    }

    /// Build term vectors for all sentences, in sentence order
    pub fn build_all(&self, sentences: &[Sentence]) -> Vec<TermVector> {
        sentences
            .iter()
            .map(|s| self.build_sentence_vector(s))
            .collect()
    }
}
