// file: src/utils/validation.rs
// description: request parameter validation and text helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Trim the raw query and require at least `min_chars` characters.
    pub fn validate_query(raw: Option<&str>, min_chars: usize) -> Result<String> {
        let query = raw.map(str::trim).unwrap_or_default();

        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "Search query 'q' parameter is required".to_string(),
            ));
        }

        if query.chars().count() < min_chars {
            return Err(SearchError::InvalidInput(format!(
                "Search query must be at least {min_chars} characters long"
            )));
        }

        Ok(query.to_string())
    }

    /// Parse a limit in `1..=max`. Anything missing, malformed or out of
    /// range yields `default`.
    pub fn parse_limit(raw: Option<&str>, max: usize, default: usize) -> usize {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|&value| value > 0 && value as u64 <= max as u64)
            .map(|value| value as usize)
            .unwrap_or(default)
    }

    /// Parse a non-negative offset, falling back to 0.
    pub fn parse_offset(raw: Option<&str>) -> usize {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|&value| value >= 0)
            .map(|value| value as usize)
            .unwrap_or(0)
    }

    pub fn validate_corpus_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SearchError::Config(format!(
                "Corpus path does not exist: {}",
                path.display()
            )));
        }

        if path.is_file() && !Self::is_json(path) {
            return Err(SearchError::Config(format!(
                "Corpus file is not a JSON file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn is_json(path: &Path) -> bool {
        matches!(path.extension().and_then(|e| e.to_str()), Some("json"))
    }

    /// Truncate to `max_chars` characters, appending "..." when cut.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
            None => text.to_string(),
        }
    }
}
