//! Core data types shared across the pipeline
//!
//! Sentences, the similarity measure selector, and the tunable
//! [`TextRankConfig`] that every stage reads from.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SummaryError};
use crate::pipeline::validation::{ValidationEngine, ValidationReport};

/// A sentence cut out of the input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Trimmed sentence text
    pub text: String,
    /// Byte offset of the first character in the document
    pub start: usize,
    /// Byte offset one past the last character in the document
    pub end: usize,
    /// Position in the document (0-based)
    pub index: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
        }
    }
}

/// Pairwise sentence similarity used as the graph edge weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// Shared term count normalized by `ln|a| + ln|b|`
    #[default]
    LogOverlap,
    /// Cosine over raw term-frequency vectors
    Cosine,
}

impl SimilarityMeasure {
    /// Returns the user-facing name used in JSON and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogOverlap => "log_overlap",
            Self::Cosine => "cosine",
        }
    }
}

impl std::str::FromStr for SimilarityMeasure {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "log_overlap" | "overlap" | "textrank" => Ok(Self::LogOverlap),
            "cosine" => Ok(Self::Cosine),
            other => Err(format!("unknown similarity measure \"{other}\"")),
        }
    }
}

/// Configuration for the extractive pipeline
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change:
///
/// ```json
/// { "damping": 0.9, "num_sentences": 5, "similarity": "cosine" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Language for the stop-word list (ISO code or English name)
    pub language: String,
    /// Drop stop words before computing similarity
    pub remove_stopwords: bool,
    /// Edge weight function
    pub similarity: SimilarityMeasure,
    /// PageRank damping factor
    pub damping: f64,
    /// L1 convergence tolerance for power iteration
    pub tolerance: f64,
    /// Hard cap on power iterations
    pub max_iterations: usize,
    /// Default number of sentences in an extractive summary
    pub num_sentences: usize,
    /// Sentence count above which pairwise similarity runs on the rayon pool
    pub parallel_threshold: usize,
    /// Extra abbreviations (one per line) merged into the built-in list
    pub abbreviations_path: Option<PathBuf>,
    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    pub strict: bool,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            remove_stopwords: true,
            similarity: SimilarityMeasure::LogOverlap,
            damping: 0.85,
            tolerance: 1e-4,
            max_iterations: 100,
            num_sentences: 3,
            parallel_threshold: 64,
            abbreviations_path: None,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl TextRankConfig {
    /// Parse a configuration from JSON without validating it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the default validation rules against this configuration.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Validate and return `self`, or fail with every collected error.
    ///
    /// Warnings are logged and otherwise ignored.
    pub fn validated(self) -> Result<Self> {
        let report = self.validate();
        for warning in report.warnings() {
            tracing::warn!(%warning, "configuration warning");
        }
        if report.has_errors() {
            return Err(SummaryError::InvalidConfig(report));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = TextRankConfig::default().validated().unwrap();
        assert_eq!(cfg.damping, 0.85);
        assert_eq!(cfg.max_iterations, 100);
        assert_eq!(cfg.similarity, SimilarityMeasure::LogOverlap);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = TextRankConfig::from_json_str(r#"{ "damping": 0.9, "similarity": "cosine" }"#)
            .unwrap();
        assert_eq!(cfg.damping, 0.9);
        assert_eq!(cfg.similarity, SimilarityMeasure::Cosine);
        assert_eq!(cfg.num_sentences, 3);
        assert!(cfg.remove_stopwords);
        assert!(cfg.unknown_fields.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let cfg = TextRankConfig::from_json_str(r#"{ "dampng": 0.9 }"#).unwrap();
        assert!(cfg.unknown_fields.contains_key("dampng"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = TextRankConfig::from_json_str("{ damping: }").unwrap_err();
        assert!(matches!(err, SummaryError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = TextRankConfig {
            damping: 1.5,
            ..TextRankConfig::default()
        };
        let err = cfg.validated().unwrap_err();
        assert!(matches!(err, SummaryError::InvalidConfig(_)));
    }

    #[test]
    fn test_similarity_from_str() {
        assert_eq!("cosine".parse::<SimilarityMeasure>(), Ok(SimilarityMeasure::Cosine));
        assert_eq!(
            "LOG_OVERLAP".parse::<SimilarityMeasure>(),
            Ok(SimilarityMeasure::LogOverlap)
        );
        assert!("jaccard".parse::<SimilarityMeasure>().is_err());
    }
}
