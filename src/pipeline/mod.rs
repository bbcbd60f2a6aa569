//! Summarization pipeline
//!
//! Stage traits, the statically composed runner, observer hooks, and the
//! configuration validation that guards every run.

pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;
