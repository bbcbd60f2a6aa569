//! Sentence segmentation
//!
//! Candidate boundaries come from Unicode sentence segmentation (UAX #29),
//! which keeps decimal numbers and closing quotes attached and does not break
//! before a lowercase continuation. Boundaries that follow a known
//! abbreviation or an initial are then merged back.

use unicode_segmentation::UnicodeSegmentation;

use super::resource::SentenceResource;
use crate::error::{Result, SummaryError};
use crate::types::Sentence;

/// Splits a document into ordered, trimmed, non-empty sentences
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'r> {
    resource: &'r SentenceResource,
}

impl<'r> Segmenter<'r> {
    /// Create a segmenter backed by an abbreviation resource
    pub fn new(resource: &'r SentenceResource) -> Self {
        Self { resource }
    }

    /// Split `text` into sentences
    ///
    /// Text without terminal punctuation is a single sentence. Empty or
    /// whitespace-only input is rejected.
    pub fn split(&self, text: &str) -> Result<Vec<Sentence>> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let fragments: Vec<(usize, &str)> = text.split_sentence_bound_indices().collect();
        let mut sentences = Vec::new();
        let mut pending: Option<usize> = None;

        for (i, &(offset, fragment)) in fragments.iter().enumerate() {
            let start = *pending.get_or_insert(offset);
            let end = offset + fragment.len();

            let joins = fragments
                .get(i + 1)
                .is_some_and(|&(_, next)| self.joins_next(&text[start..end], next));
            if joins {
                continue;
            }

            push_trimmed(&mut sentences, text, start, end);
            pending = None;
        }

        Ok(sentences)
    }

    /// Whether the boundary between `current` and `next` is a false one
    ///
    /// Unconditional abbreviations always join. Abbreviations that are also
    /// plain words join only before a lowercase letter or a digit. A single
    /// capital letter joins only as part of a run of initials or as the
    /// first word of its fragment (`J. R. Tolkien`, `J. Smith`).
    fn joins_next(&self, current: &str, next: &str) -> bool {
        let current = current.trim_end();
        if !current.ends_with('.') {
            return false;
        }

        let mut words = current.split_whitespace().rev().map(strip_leading_punctuation);
        let Some(last) = words.next() else {
            return false;
        };

        if self.resource.is_abbreviation(last) {
            return true;
        }
        if self.resource.is_ambiguous(last) {
            return next
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.is_lowercase() || c.is_ascii_digit());
        }
        if is_initial(last) {
            let next_is_initial = next
                .split_whitespace()
                .next()
                .map(strip_leading_punctuation)
                .is_some_and(is_initial);
            return match words.next() {
                None => true,
                Some(previous) => is_initial(previous) || next_is_initial,
            };
        }
        false
    }
}

fn strip_leading_punctuation(word: &str) -> &str {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// A capital letter followed by a period, other than the words `I` and `A`.
fn is_initial(word: &str) -> bool {
    let Some(letter) = word.strip_suffix('.') else {
        return false;
    };
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase() && c != 'I' && c != 'A',
        _ => false,
    }
}

fn push_trimmed(sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let start = start + lead;
    let index = sentences.len();
    sentences.push(Sentence::new(trimmed, start, start + trimmed.len(), index));
}
