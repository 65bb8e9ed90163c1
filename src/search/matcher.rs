// file: src/search/matcher.rs
// description: field matching capability used by scans and scorers
// reference: https://docs.rs/regex

use crate::error::{Result, SearchError};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Decides whether, where and how often a query occurs in a piece of text.
///
/// Scanning and scoring only go through this trait, so a tokenized or indexed
/// implementation can replace the substring scan without touching merge or
/// ranking.
pub trait Matcher: Send + Sync {
    /// The trimmed query this matcher was built from.
    fn query(&self) -> &str;

    /// Byte range of the first occurrence in `text`.
    fn find(&self, text: &str) -> Option<Range<usize>>;

    /// Number of non-overlapping occurrences in `text`.
    fn count(&self, text: &str) -> usize;

    fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

/// Case-insensitive literal substring matching. Regex metacharacters in the
/// query are escaped, so `a.b` only matches a literal dot.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    query: String,
    pattern: Regex,
}

impl SubstringMatcher {
    pub fn new(query: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidInput(format!("Unusable search query: {e}")))?;

        Ok(Self {
            query: query.to_string(),
            pattern,
        })
    }
}

impl Matcher for SubstringMatcher {
    fn query(&self) -> &str {
        &self.query
    }

    fn find(&self, text: &str) -> Option<Range<usize>> {
        self.pattern.find(text).map(|m| m.range())
    }

    fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
