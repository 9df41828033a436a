//! Quran resolver: one deterministic algorithm for the three
//! client call patterns (numeric lookup, dropdown-selected name,
//! free-text search box).
//!
//! Precedence is strict: numeric > exact name > substring, first
//! match wins. A miss is not an error; the orchestrator shapes it
//! into a "no result found" response.

use crate::core::corpus::CorpusStore;
use crate::core::types::{QuranQueryInput, Surah};
use std::sync::Arc;

/// Resolves surah queries against the corpus store
#[derive(Debug, Clone)]
pub struct QuranResolver {
    corpus: Arc<CorpusStore>,
}

impl QuranResolver {
    pub fn new(corpus: Arc<CorpusStore>) -> Self {
        Self { corpus }
    }

    /// Resolve a query to a surah.
    ///
    /// - a number in [1,114] resolves by surah number;
    /// - a string parsing as such a number resolves the same way;
    /// - otherwise the string is matched against names and aliases
    ///   (exact first, then substring).
    ///
    /// On success the full ordered verse list is available through
    /// the returned surah, never truncated or reordered.
    pub fn resolve(&self, query: &QuranQueryInput) -> Option<&Surah> {
        match query {
            QuranQueryInput::Number(n) => self.corpus.surah_by_number(*n),
            QuranQueryInput::Text(text) => {
                let text = text.trim();
                if let Ok(n) = text.parse::<u32>() {
                    // Numeric strings follow the numeric path only;
                    // "114" never falls through to a name scan.
                    self.corpus.surah_by_number(n)
                } else {
                    self.corpus.surah_by_name_or_alias(text)
                }
            }
        }
    }
}
