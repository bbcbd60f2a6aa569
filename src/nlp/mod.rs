//! Natural Language Processing components
//!
//! This module provides sentence segmentation, term tokenization and
//! stopword filtering.

pub mod resource;
pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;
