//! Request/response front door for hosts
//!
//! A [`Summarizer`] owns the validated configuration and the optional neural
//! backend. Each call takes an explicit [`SummaryRequest`] and returns a
//! [`SummaryResponse`]; nothing is remembered between calls.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::error::{Result, SummaryError};
use crate::neural::{summarize_with_timeout, NeuralParams, NeuralSummarizer};
use crate::pipeline::observer::NoopObserver;
use crate::pipeline::runner::TextRankPipeline;
use crate::summarizer::selector::SummaryResult;
use crate::types::TextRankConfig;

/// Which summarizer to run, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SummaryMethod {
    /// TextRank sentence extraction
    Extractive { num_sentences: usize },
    /// Pretrained sequence-to-sequence model
    Neural { max_len: usize, min_len: usize },
}

impl SummaryMethod {
    pub fn extractive(num_sentences: usize) -> Self {
        Self::Extractive { num_sentences }
    }

    pub fn neural(params: NeuralParams) -> Self {
        Self::Neural {
            max_len: params.max_len,
            min_len: params.min_len,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Extractive { .. } => "extractive",
            Self::Neural { .. } => "neural",
        }
    }
}

/// Input to [`Summarizer::summarize`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(flatten)]
    pub method: SummaryMethod,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>, method: SummaryMethod) -> Self {
        Self {
            text: text.into(),
            method,
        }
    }
}

/// Output of [`Summarizer::summarize`]
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub method: SummaryMethod,
    pub summary: String,
    /// Selection details; present for the extractive method only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractive: Option<SummaryResult>,
}

/// Summarization service
pub struct Summarizer {
    config: TextRankConfig,
    pipeline: TextRankPipeline,
    neural: Option<Arc<dyn NeuralSummarizer>>,
    neural_timeout: Option<Duration>,
}

impl Summarizer {
    /// Create a service after validating `config`
    pub fn new(config: TextRankConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            pipeline: TextRankPipeline::textrank(),
            neural: None,
            neural_timeout: None,
        })
    }

    /// Attach a neural backend
    pub fn with_neural(mut self, model: Arc<dyn NeuralSummarizer>) -> Self {
        self.neural = Some(model);
        self
    }

    /// Bound every neural call by `timeout`
    pub fn with_neural_timeout(mut self, timeout: Duration) -> Self {
        self.neural_timeout = Some(timeout);
        self
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    /// Whether a neural backend is attached
    pub fn has_neural(&self) -> bool {
        self.neural.is_some()
    }

    /// Run the requested method
    ///
    /// Empty input is rejected before either method runs. There is no
    /// fallback from one method to the other.
    pub fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        let _span = info_span!("summarize", method = request.method.name()).entered();

        if request.text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        match request.method {
            SummaryMethod::Extractive { num_sentences } => {
                let result =
                    self.pipeline
                        .run(&request.text, num_sentences, &self.config, &mut NoopObserver)?;
                debug!(
                    selected = result.len(),
                    total = result.total_sentences,
                    "extractive summary ready"
                );
                Ok(SummaryResponse {
                    method: request.method,
                    summary: result.text.clone(),
                    extractive: Some(result),
                })
            }
            SummaryMethod::Neural { max_len, min_len } => {
                let params = NeuralParams::new(max_len, min_len);
                params.validate()?;
                let model = self.neural.as_ref().ok_or(SummaryError::NeuralUnavailable)?;

                let summary = match self.neural_timeout {
                    Some(timeout) => {
                        summarize_with_timeout(Arc::clone(model), &request.text, params, timeout)?
                    }
                    None => model.summarize(&request.text, max_len, min_len)?,
                };
                Ok(SummaryResponse {
                    method: request.method,
                    summary,
                    extractive: None,
                })
            }
        }
    }

    /// Run several methods over the same text
    ///
    /// Each method gets its own result; one failing never prevents the
    /// others from running.
    pub fn summarize_all(
        &self,
        text: &str,
        methods: &[SummaryMethod],
    ) -> Vec<(SummaryMethod, Result<SummaryResponse>)> {
        methods
            .iter()
            .map(|&method| {
                let request = SummaryRequest::new(text, method);
                (method, self.summarize(&request))
            })
            .collect()
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("config", &self.config)
            .field("neural", &self.neural.is_some())
            .field("neural_timeout", &self.neural_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neural::NeuralError;
    use pretty_assertions::assert_eq;

    const MAMMALS: &str =
        "Cats are mammals. Dogs are mammals too. The sky is blue. Mammals have fur.";

    fn service() -> Summarizer {
        Summarizer::new(TextRankConfig::default()).unwrap()
    }

    fn first_words(text: &str, max_len: usize, _: usize) -> std::result::Result<String, NeuralError> {
        Ok(text.split_whitespace().take(max_len).collect::<Vec<_>>().join(" "))
    }

    fn broken(_: &str, _: usize, _: usize) -> std::result::Result<String, NeuralError> {
        Err(NeuralError::Inference("out of memory".into()))
    }

    #[test]
    fn test_extractive_request() {
        let response = service()
            .summarize(&SummaryRequest::new(MAMMALS, SummaryMethod::extractive(2)))
            .unwrap();

        let details = response.extractive.unwrap();
        assert_eq!(details.len(), 2);
        assert!(!details.indices().contains(&2));
        assert_eq!(response.summary, details.text);
    }

    #[test]
    fn test_neural_request_uses_backend() {
        let svc = service().with_neural(Arc::new(first_words));
        let response = svc
            .summarize(&SummaryRequest::new(
                MAMMALS,
                SummaryMethod::Neural {
                    max_len: 3,
                    min_len: 1,
                },
            ))
            .unwrap();

        assert_eq!(response.summary, "Cats are mammals.");
        assert!(response.extractive.is_none());
    }

    #[test]
    fn test_neural_without_backend() {
        let err = service()
            .summarize(&SummaryRequest::new(
                MAMMALS,
                SummaryMethod::neural(NeuralParams::default()),
            ))
            .unwrap_err();
        assert!(matches!(err, SummaryError::NeuralUnavailable));
    }

    #[test]
    fn test_neural_params_validated_before_backend() {
        let svc = service().with_neural(Arc::new(first_words));
        let err = svc
            .summarize(&SummaryRequest::new(
                MAMMALS,
                SummaryMethod::Neural {
                    max_len: 10,
                    min_len: 50,
                },
            ))
            .unwrap_err();
        assert!(matches!(err, SummaryError::InvalidParameter { .. }));
    }

    #[test]
    fn test_neural_timeout_applies() {
        let svc = service()
            .with_neural(Arc::new(first_words))
            .with_neural_timeout(Duration::from_secs(5));
        let response = svc
            .summarize(&SummaryRequest::new(
                "a b c",
                SummaryMethod::Neural {
                    max_len: 2,
                    min_len: 1,
                },
            ))
            .unwrap();
        assert_eq!(response.summary, "a b");
    }

    #[test]
    fn test_empty_input_rejected_for_both_methods() {
        let svc = service().with_neural(Arc::new(first_words));
        for method in [
            SummaryMethod::extractive(3),
            SummaryMethod::neural(NeuralParams::default()),
        ] {
            let err = svc.summarize(&SummaryRequest::new("   ", method)).unwrap_err();
            assert!(matches!(err, SummaryError::EmptyInput));
        }
    }

    #[test]
    fn test_methods_fail_independently() {
        let svc = service().with_neural(Arc::new(broken));
        let results = svc.summarize_all(
            MAMMALS,
            &[
                SummaryMethod::neural(NeuralParams::default()),
                SummaryMethod::extractive(1),
            ],
        );

        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0].1,
            Err(SummaryError::Neural(NeuralError::Inference(_)))
        ));
        let extractive = results[1].1.as_ref().unwrap();
        assert_eq!(extractive.extractive.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_unavailable_resource_reaches_the_caller() {
        let cfg = TextRankConfig {
            abbreviations_path: Some("/definitely/missing/abbrev.txt".into()),
            ..TextRankConfig::default()
        };
        let err = Summarizer::new(cfg)
            .unwrap()
            .summarize(&SummaryRequest::new(MAMMALS, SummaryMethod::extractive(1)))
            .unwrap_err();

        assert!(matches!(err, SummaryError::ResourceUnavailable { .. }));
        assert_eq!(err.code(), crate::ErrorCode::ResourceUnavailable);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = TextRankConfig {
            tolerance: -1.0,
            ..TextRankConfig::default()
        };
        assert!(matches!(
            Summarizer::new(cfg),
            Err(SummaryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_request_json_shape() {
        let request: SummaryRequest = serde_json::from_str(
            r#"{ "text": "Hello there.", "method": "extractive", "num_sentences": 2 }"#,
        )
        .unwrap();
        assert_eq!(request.method, SummaryMethod::extractive(2));

        let request: SummaryRequest = serde_json::from_str(
            r#"{ "text": "Hello there.", "method": "neural", "max_len": 130, "min_len": 30 }"#,
        )
        .unwrap();
        assert_eq!(request.method, SummaryMethod::neural(NeuralParams::default()));
    }
}
