//! Bilingual FAQ knowledge base used as the chatbot fallback
//!
//! The catalog is a fixed list of entries, each mapping a handful of short
//! trigger phrases to an English and a Hindi answer. It is loaded once at
//! startup, validated, and then shared read-only:
//!
//! ```rust,no_run
//! use khetguru::kb::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin().unwrap();
//! if let Some(found) = kb.find_answer("which crop for sandy soil?") {
//!     println!("{} (score {})", found.answer, found.score);
//! }
//! ```

pub mod matcher;
pub mod reply;
pub mod text;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;

pub use matcher::KbMatch;
pub use reply::compose_rule_based;
pub use reply::ReplyComposer;
pub use text::detect_language;
pub use text::normalize;
pub use text::Language;

use crate::config::KnowledgeConfig;
use crate::KhetGuruError;
use crate::Result;

const BUILTIN_CATALOG: &str = include_str!("../../data/knowledge_base.json");

/// One FAQ entry: trigger patterns and the two answer variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbEntry {
    pub patterns: Vec<String>,
    pub answer_en: String,
    pub answer_hi: String,
}

impl KbEntry {
    pub fn answer(&self, language: Language) -> &str {
        match language {
            Language::English => &self.answer_en,
            Language::Hindi => &self.answer_hi,
        }
    }
}

/// Pattern in matching form, prepared once at load time
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    pub(crate) normalized: String,
    pub(crate) tokens: BTreeSet<String>,
}

impl CompiledPattern {
    fn new(pattern: &str) -> Self {
        let normalized = text::normalize(pattern);
        let tokens = text::token_set(&normalized);
        Self { normalized, tokens }
    }
}

/// Immutable, validated FAQ catalog
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KbEntry>,
    compiled: Vec<Vec<CompiledPattern>>,
}

impl KnowledgeBase {
    /// Build a catalog, rejecting entries without patterns or answers
    pub fn from_entries(entries: Vec<KbEntry>) -> Result<Self> {
        for (idx, entry) in entries.iter().enumerate() {
            if entry.patterns.is_empty() {
                return Err(KhetGuruError::Catalog(format!(
                    "knowledge entry {idx} has no patterns"
                )));
            }
            if entry.answer_en.trim().is_empty() || entry.answer_hi.trim().is_empty() {
                return Err(KhetGuruError::Catalog(format!(
                    "knowledge entry {idx} is missing an answer variant"
                )));
            }
        }

        let mut compiled = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let mut patterns = Vec::with_capacity(entry.patterns.len());
            for pattern in &entry.patterns {
                let pattern_form = CompiledPattern::new(pattern);
                // an empty form can never match
                if pattern_form.tokens.is_empty() {
                    return Err(KhetGuruError::Catalog(format!(
                        "knowledge entry {idx} has pattern {pattern:?} with no matchable words"
                    )));
                }
                patterns.push(pattern_form);
            }
            compiled.push(patterns);
        }

        Ok(Self { entries, compiled })
    }

    /// Parse a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<KbEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Configured replacement catalog, or the built-in one
    pub fn load(config: &KnowledgeConfig) -> Result<Self> {
        let kb = match &config.catalog_path {
            Some(path) => {
                info!("Loading knowledge base from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::builtin()?,
        };
        info!("Knowledge base ready: {} entries", kb.len());
        Ok(kb)
    }

    pub fn entries(&self) -> &[KbEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
