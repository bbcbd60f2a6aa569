//! Term extraction for similarity scoring
//!
//! Terms are Unicode words (UAX #29), lowercased, with punctuation-only
//! segments dropped and stop words optionally removed.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;
use crate::types::TextRankConfig;

/// Turns sentence text into normalized terms
#[derive(Debug, Clone)]
pub struct TermTokenizer {
    stopwords: StopwordFilter,
}

impl Default for TermTokenizer {
    fn default() -> Self {
        Self::new(StopwordFilter::default())
    }
}

impl TermTokenizer {
    /// Create a tokenizer that drops the given stop words
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Create a tokenizer that keeps every word
    pub fn unfiltered() -> Self {
        Self::new(StopwordFilter::empty())
    }

    /// Build the tokenizer described by `cfg`
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        if cfg.remove_stopwords {
            Self::new(StopwordFilter::new(&cfg.language))
        } else {
            Self::unfiltered()
        }
    }

    /// Extract terms in order of appearance (duplicates kept)
    pub fn terms(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .filter(|w| !self.stopwords.is_stopword(w))
            .collect()
    }
}
