//! Hadith resolver: substring matching over title + topic with an
//! optional post-filter range bound.
//!
//! The match haystack deliberately excludes the hadith body: the
//! reference UI matches on title and topic only and shows the body
//! as display text. Corpus order is preserved by every filter.

use crate::core::corpus::CorpusStore;
use crate::core::types::HadithRecord;
use std::sync::Arc;

/// Bound on the number of records returned, applied after
/// filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeLimit {
    /// No truncation
    All,

    /// First N matching records in corpus order
    First(usize),
}

impl RangeLimit {
    /// Parse a client range string: "all" or "firstN" (a "first"
    /// prefix followed by a number, whitespace tolerated).
    ///
    /// Unrecognized values fall back to `All`: the reference UI
    /// only ever sends its fixed dropdown values, and silently
    /// truncating on a typo would hide data.
    pub fn parse(range: &str) -> Self {
        let range = range.trim().to_lowercase();
        if let Some(rest) = range.strip_prefix("first") {
            if let Ok(n) = rest.trim().parse::<usize>() {
                return RangeLimit::First(n);
            }
        }

        RangeLimit::All
    }
}

/// Matches free-text queries and topics against the hadith corpus
#[derive(Debug, Clone)]
pub struct HadithResolver {
    corpus: Arc<CorpusStore>,
}

impl HadithResolver {
    pub fn new(corpus: Arc<CorpusStore>) -> Self {
        Self { corpus }
    }

    /// Return the matching subsequence in corpus order.
    ///
    /// A record matches when the query is empty or its haystack
    /// (lowercase title + topic) contains the lowercased query,
    /// AND the topic filter is empty or contained the same way.
    /// Empty query and topic with `All` returns the entire corpus,
    /// which is a valid, non-error result.
    pub fn search(&self, query: &str, topic: &str, range: RangeLimit) -> Vec<&HadithRecord> {
        let query = query.trim().to_lowercase();
        let topic = topic.trim().to_lowercase();

        let matches = self.corpus.all_hadith_records().iter().filter(|record| {
            if query.is_empty() && topic.is_empty() {
                return true;
            }

            let haystack = record.haystack();
            (query.is_empty() || haystack.contains(&query))
                && (topic.is_empty() || haystack.contains(&topic))
        });

        match range {
            RangeLimit::All => matches.collect(),
            RangeLimit::First(n) => matches.take(n).collect(),
        }
    }
}
