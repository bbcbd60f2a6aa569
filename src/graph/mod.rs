//! Graph construction and representation
//!
//! This module provides efficient graph building and storage
//! for the TextRank sentence similarity graph.

pub mod builder;
pub mod csr;
