//! Abstractive summarization seam
//!
//! The crate does not ship a model. Hosts plug a pretrained
//! sequence-to-sequence summarizer in through [`NeuralSummarizer`]; the
//! service treats it as an opaque, possibly slow `text -> text` call.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{Result, SummaryError};

/// Failures reported by a neural backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NeuralError {
    #[error("neural model failed to load: {0}")]
    ModelLoad(String),
    #[error("neural inference failed: {0}")]
    Inference(String),
    #[error("neural summarization timed out after {0:?}")]
    Timeout(Duration),
    #[error("neural worker exited without a result")]
    Disconnected,
}

/// Output length bounds, in model tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeuralParams {
    pub max_len: usize,
    pub min_len: usize,
}

impl Default for NeuralParams {
    fn default() -> Self {
        Self {
            max_len: 130,
            min_len: 30,
        }
    }
}

impl NeuralParams {
    pub fn new(max_len: usize, min_len: usize) -> Self {
        Self { max_len, min_len }
    }

    /// Require `1 <= min_len <= max_len`.
    pub fn validate(&self) -> Result<()> {
        if self.min_len == 0 {
            return Err(SummaryError::invalid_parameter("min_len", "must be at least 1"));
        }
        if self.min_len > self.max_len {
            return Err(SummaryError::invalid_parameter(
                "min_len",
                format!(
                    "must not exceed max_len ({} > {})",
                    self.min_len, self.max_len
                ),
            ));
        }
        Ok(())
    }
}

/// A pretrained abstractive summarizer
///
/// Implementations may block for a long time; callers bound them with
/// [`summarize_with_timeout`].
pub trait NeuralSummarizer: Send + Sync {
    fn summarize(
        &self,
        text: &str,
        max_len: usize,
        min_len: usize,
    ) -> std::result::Result<String, NeuralError>;
}

impl<F> NeuralSummarizer for F
where
    F: Fn(&str, usize, usize) -> std::result::Result<String, NeuralError> + Send + Sync,
{
    fn summarize(
        &self,
        text: &str,
        max_len: usize,
        min_len: usize,
    ) -> std::result::Result<String, NeuralError> {
        self(text, max_len, min_len)
    }
}

/// Run `model` on a worker thread and give up after `timeout`
///
/// On timeout the worker is detached; its eventual result is dropped.
pub fn summarize_with_timeout(
    model: Arc<dyn NeuralSummarizer>,
    text: &str,
    params: NeuralParams,
    timeout: Duration,
) -> std::result::Result<String, NeuralError> {
    let (tx, rx) = mpsc::channel();
    let text = text.to_owned();

    thread::Builder::new()
        .name("neural-summarizer".into())
        .spawn(move || {
            let result = model.summarize(&text, params.max_len, params.min_len);
            // Receiver is gone after a timeout
            let _ = tx.send(result);
        })
        .map_err(|e| NeuralError::Inference(format!("failed to spawn worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            debug!(ok = result.is_ok(), "neural summarizer returned");
            result
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!(?timeout, "neural summarizer timed out");
            Err(NeuralError::Timeout(timeout))
        }
        Err(RecvTimeoutError::Disconnected) => Err(NeuralError::Disconnected),
    }
}
