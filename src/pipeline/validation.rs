//! Validation engine for pipeline configuration.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`TextRankConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! users see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use rapid_summarizer::pipeline::validation::ValidationEngine;
//! use rapid_summarizer::TextRankConfig;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&TextRankConfig::default());
//! assert!(report.is_valid());
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::ConfigError;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::TextRankConfig;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a [`ConfigError`] that carries
/// the code, path, message, and hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// One-line rendering of every error, separated by `"; "`.
    pub fn summary(&self) -> String {
        self.errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`TextRankConfig`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `cfg` and return any findings.
    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`TextRankConfig`] and
/// collects all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(ConvergenceRule));
        engine.add_rule(Box::new(SentenceCountRule));
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `cfg` and return the collected report.
    pub fn validate(&self, cfg: &TextRankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(cfg));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. damping must lie strictly inside (0, 1) ─────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        if cfg.damping.is_finite() && cfg.damping > 0.0 && cfg.damping < 1.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::OutOfRange,
                "/damping",
                format!("damping must be in (0, 1), got {}", cfg.damping),
            )
            .with_hint("The usual value is 0.85"),
        )]
    }
}

// ─── 2. power iteration must be able to stop ────────────────────────────────

struct ConvergenceRule;

impl ValidationRule for ConvergenceRule {
    fn name(&self) -> &str {
        "convergence"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !(cfg.tolerance.is_finite() && cfg.tolerance > 0.0) {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/tolerance",
                    format!("tolerance must be a positive number, got {}", cfg.tolerance),
                )
                .with_hint("The usual value is 1e-4"),
            ));
        } else if cfg.tolerance > 1e-2 {
            out.push(ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/tolerance",
                    format!("tolerance {} is loose; scores may be far from converged", cfg.tolerance),
                )
                .with_hint("Use a value of 1e-3 or smaller"),
            ));
        }

        if cfg.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/max_iterations",
                    "max_iterations must be greater than 0",
                )
                .with_hint("The usual value is 100"),
            ));
        }

        out
    }
}

// ─── 3. summaries need at least one sentence ────────────────────────────────

struct SentenceCountRule;

impl ValidationRule for SentenceCountRule {
    fn name(&self) -> &str {
        "sentence_count"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        if cfg.num_sentences > 0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::OutOfRange,
                "/num_sentences",
                "num_sentences must be greater than 0",
            )
            .with_hint("Requests larger than the document are clamped, so any positive value works"),
        )]
    }
}

// ─── 4. stop-word language falls back to English ────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        if !cfg.remove_stopwords || StopwordFilter::is_supported(&cfg.language) {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            ConfigError::new(
                ErrorCode::UnsupportedLanguage,
                "/language",
                format!("no stop-word list for \"{}\"; English is used", cfg.language),
            )
            .with_hint("Set remove_stopwords to false to disable filtering"),
        )]
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = cfg.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let diag_fn = if cfg.strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
