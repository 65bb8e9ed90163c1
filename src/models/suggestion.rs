// file: src/models/suggestion.rs
// description: autocomplete suggestion model and its type priority

use serde::{Deserialize, Serialize};

/// Where a suggestion came from. Lower priority value ranks first on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Title,
    Phrase,
    Keyword,
    Tag,
    Content,
    Institution,
    #[serde(other)]
    Other,
}

impl SuggestionType {
    pub fn priority(&self) -> u8 {
        match self {
            Self::Title => 1,
            Self::Phrase => 2,
            Self::Keyword => 3,
            Self::Tag => 4,
            Self::Content => 5,
            Self::Institution => 6,
            Self::Other => 7,
        }
    }

    /// Keep whichever of the two types ranks first.
    pub fn preferred(self, other: SuggestionType) -> SuggestionType {
        if other.priority() < self.priority() {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub text: String,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
}
