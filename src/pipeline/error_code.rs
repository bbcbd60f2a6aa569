//! Stable error codes.
//!
//! Codes are part of the public contract: they serialize as snake_case
//! strings and never change meaning once released.

use serde::Serialize;

/// Machine-readable classification of a failure or validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A numeric setting is outside its allowed range.
    OutOfRange,
    /// A value has the right type but an unusable content.
    InvalidValue,
    /// A field is not part of the schema.
    UnknownField,
    /// The stop-word language is not bundled; English is used instead.
    UnsupportedLanguage,
    /// Input text is empty or whitespace only.
    EmptyInput,
    /// The sentence-boundary resource could not be initialized.
    ResourceUnavailable,
    /// A zero-node graph reached the ranker.
    EmptyGraph,
    /// The configuration could not be parsed or validated.
    InvalidConfig,
    /// The neural method was requested without a backend.
    NeuralUnavailable,
    /// The neural backend reported a failure.
    NeuralFailure,
    /// The neural backend exceeded its time bound.
    Timeout,
}

impl ErrorCode {
    /// Returns the snake_case name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::InvalidValue => "invalid_value",
            Self::UnknownField => "unknown_field",
            Self::UnsupportedLanguage => "unsupported_language",
            Self::EmptyInput => "empty_input",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::EmptyGraph => "empty_graph",
            Self::InvalidConfig => "invalid_config",
            Self::NeuralUnavailable => "neural_unavailable",
            Self::NeuralFailure => "neural_failure",
            Self::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_as_str() {
        for code in [
            ErrorCode::OutOfRange,
            ErrorCode::UnknownField,
            ErrorCode::EmptyInput,
            ErrorCode::Timeout,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }
}
