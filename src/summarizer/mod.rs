//! Summarization components
//!
//! Term vectors feed the similarity graph; the selector turns PageRank
//! scores into an ordered extractive summary.

pub mod selector;
pub mod term_vector;
