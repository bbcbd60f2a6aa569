//! Sentence-boundary language resource
//!
//! The segmenter needs to know which tokens ending in a period are
//! abbreviations rather than sentence ends. The bundled list is built once
//! per process on first use and shared read-only afterwards. Lists extended
//! from a file are cached per path, so the same configuration always sees
//! the same resource regardless of call order.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::{Result, SummaryError};

/// Abbreviations that are never sentence-final words, lowercase, without the
/// final period.
const BUILTIN_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "rev", "hon", "gov", "capt", "lt",
    "sgt", "cmdr", "adm", "vs", "inc", "ltd", "co", "corp", "bros", "dept", "univ", "assn",
    "approx", "fig", "figs", "vol", "vols", "nos", "pp", "eds", "jan", "feb", "apr", "jun", "jul",
    "aug", "sept", "oct", "nov", "dec", "e.g", "i.e", "cf", "al", "u.s", "u.k", "u.n", "ph.d",
    "m.d", "b.a", "m.a",
];

/// Abbreviations that are also ordinary English words ("no", "sun", "sat").
/// They only join fragments when the next one cannot start a sentence.
const BUILTIN_AMBIGUOUS: &[&str] = &[
    "no", "ed", "est", "gen", "col", "rep", "sen", "mar", "sep", "mon", "tue", "wed", "thu",
    "fri", "sat", "sun",
];

static BUILTIN: OnceLock<Arc<SentenceResource>> = OnceLock::new();
static EXTENDED: OnceLock<Mutex<FxHashMap<PathBuf, Arc<SentenceResource>>>> = OnceLock::new();

/// Abbreviation data used by the sentence segmenter
#[derive(Debug, Clone)]
pub struct SentenceResource {
    abbreviations: FxHashSet<String>,
    ambiguous: FxHashSet<String>,
    source: Option<PathBuf>,
}

impl SentenceResource {
    /// The bundled English abbreviation lists
    pub fn builtin() -> Self {
        Self {
            abbreviations: BUILTIN_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            ambiguous: BUILTIN_AMBIGUOUS.iter().map(|s| s.to_string()).collect(),
            source: None,
        }
    }

    /// The bundled lists extended with one abbreviation per line of `path`
    ///
    /// Blank lines and lines starting with `#` are skipped; a trailing
    /// period on an entry is optional. File entries are unconditional.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| SummaryError::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let mut resource = Self::builtin();
        resource.abbreviations.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(|l| l.trim_end_matches('.').to_lowercase()),
        );
        resource.source = Some(path.to_path_buf());
        Ok(resource)
    }

    /// Whether `word` (with or without its final period) is an abbreviation
    /// that never ends a sentence.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations
            .contains(&word.trim_end_matches('.').to_lowercase())
    }

    /// Whether `word` is an abbreviation that doubles as an ordinary word.
    pub fn is_ambiguous(&self, word: &str) -> bool {
        self.ambiguous
            .contains(&word.trim_end_matches('.').to_lowercase())
    }

    /// Number of unconditional abbreviations
    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    /// Whether the unconditional list is empty
    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    /// File the resource was extended from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Initialize the process-wide bundled resource.
///
/// Idempotent: later calls return the same shared resource.
pub fn ensure_initialized() -> Result<Arc<SentenceResource>> {
    let resource = BUILTIN.get_or_init(|| {
        let resource = SentenceResource::builtin();
        debug!(abbreviations = resource.len(), "sentence resource initialized");
        Arc::new(resource)
    });
    Ok(Arc::clone(resource))
}

/// Resource for `path`, or the bundled one when `path` is `None`.
///
/// Each path is loaded at most once per process. A failed load is not
/// cached, so the caller may retry.
pub fn ensure_initialized_with(path: Option<&Path>) -> Result<Arc<SentenceResource>> {
    let Some(path) = path else {
        return ensure_initialized();
    };

    let cache = EXTENDED.get_or_init(|| Mutex::new(FxHashMap::default()));
    let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(resource) = cache.get(path) {
        return Ok(Arc::clone(resource));
    }

    let resource = SentenceResource::from_file(path).inspect_err(|err| {
        warn!(error = %err, "failed to initialize sentence resource");
    })?;
    debug!(
        abbreviations = resource.len(),
        source = %path.display(),
        "sentence resource initialized"
    );

    let resource = Arc::new(resource);
    cache.insert(path.to_path_buf(), Arc::clone(&resource));
    Ok(resource)
}

/// Whether the process-wide bundled resource has been initialized
pub fn is_initialized() -> bool {
    BUILTIN.get().is_some()
}
