//! Token-containment retrieval over the FAQ catalog
//!
//! A pattern scores its token count when all of its tokens occur in the query
//! (word order and repetition do not matter), and 1 when it only occurs as a
//! contiguous substring of the normalized query. An entry scores the best of
//! its patterns; the first entry with the highest score wins.

use std::collections::BTreeSet;

use tracing::debug;

use super::text;
use super::text::Language;
use super::CompiledPattern;
use super::KnowledgeBase;

/// Score of a pattern found only as a substring
const SUBSTRING_SCORE: usize = 1;

/// Best catalog answer for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KbMatch<'a> {
    /// Position of the entry in the catalog
    pub entry_index: usize,
    pub score: usize,
    pub language: Language,
    pub answer: &'a str,
}

impl KnowledgeBase {
    /// Find the best-matching answer in the query's language
    ///
    /// `None` means no entry scored above zero; callers fall back to other rules.
    pub fn find_answer(&self, query: &str) -> Option<KbMatch<'_>> {
        let language = text::detect_language(query);
        let normalized = text::normalize(query);
        let tokens = text::token_set(&normalized);

        let mut best: Option<(usize, usize)> = None;
        for (idx, patterns) in self.compiled.iter().enumerate() {
            let score = entry_score(patterns, &normalized, &tokens);
            // strictly greater keeps the earliest entry on ties
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((idx, score));
            }
        }

        let (entry_index, score) = best?;
        debug!(
            "KB match: entry {} score {} ({})",
            entry_index, score, language
        );
        Some(KbMatch {
            entry_index,
            score,
            language,
            answer: self.entries[entry_index].answer(language),
        })
    }
}

fn entry_score(
    patterns: &[CompiledPattern],
    normalized_query: &str,
    query_tokens: &BTreeSet<String>,
) -> usize {
    patterns
        .iter()
        .map(|p| pattern_score(p, normalized_query, query_tokens))
        .max()
        .unwrap_or(0)
}

fn pattern_score(
    pattern: &CompiledPattern,
    normalized_query: &str,
    query_tokens: &BTreeSet<String>,
) -> usize {
    if pattern.tokens.is_subset(query_tokens) {
        pattern.tokens.len()
    } else if normalized_query.contains(pattern.normalized.as_str()) {
        SUBSTRING_SCORE
    } else {
        0
    }
}
