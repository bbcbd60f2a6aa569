//! Error type for the summarization pipeline
//!
//! Every variant maps to a stable [`ErrorCode`] so hosts can report
//! failures as structured data without matching on message text.

use std::path::PathBuf;

use thiserror::Error;

use crate::neural::NeuralError;
use crate::pipeline::error_code::ErrorCode;
use crate::pipeline::validation::ValidationReport;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SummaryError> = std::result::Result<T, E>;

/// Errors raised by the extractive pipeline and the summarization service
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The input is empty or whitespace only.
    #[error("input text is empty")]
    EmptyInput,

    /// The sentence-boundary resource could not be loaded. Retrying is allowed.
    #[error("sentence resource unavailable ({}): {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ranker was handed a graph with no nodes. Upstream contract violation.
    #[error("cannot rank an empty graph")]
    EmptyGraph,

    /// A request parameter is outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The configuration failed validation.
    #[error("invalid configuration: {}", .0.summary())]
    InvalidConfig(ValidationReport),

    /// The configuration is not well-formed JSON.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The neural method was requested but no backend is attached.
    #[error("no neural summarizer is configured")]
    NeuralUnavailable,

    /// The neural backend failed.
    #[error(transparent)]
    Neural(#[from] NeuralError),
}

impl SummaryError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::EmptyInput,
            Self::ResourceUnavailable { .. } => ErrorCode::ResourceUnavailable,
            Self::EmptyGraph => ErrorCode::EmptyGraph,
            Self::InvalidParameter { .. } => ErrorCode::InvalidValue,
            Self::InvalidConfig(_) | Self::ConfigParse(_) => ErrorCode::InvalidConfig,
            Self::NeuralUnavailable => ErrorCode::NeuralUnavailable,
            Self::Neural(NeuralError::Timeout(_)) => ErrorCode::Timeout,
            Self::Neural(_) => ErrorCode::NeuralFailure,
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(SummaryError::EmptyInput.code(), ErrorCode::EmptyInput);
        assert_eq!(SummaryError::EmptyGraph.code(), ErrorCode::EmptyGraph);
        assert_eq!(
            SummaryError::Neural(NeuralError::Timeout(Duration::from_secs(1))).code(),
            ErrorCode::Timeout
        );
        assert_eq!(
            SummaryError::Neural(NeuralError::Inference("boom".into())).code(),
            ErrorCode::NeuralFailure
        );
    }

    #[test]
    fn test_resource_error_mentions_path() {
        let err = SummaryError::ResourceUnavailable {
            path: PathBuf::from("/missing/abbrev.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/abbrev.txt"));
        assert!(msg.contains("not found"));
    }
}
