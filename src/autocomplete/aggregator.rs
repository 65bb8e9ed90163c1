// file: src/autocomplete/aggregator.rs
// description: case-insensitive suggestion tallies merged across fields

use crate::models::{SuggestionItem, SuggestionType};
use crate::search::ranking::rank_suggestions;
use std::collections::HashMap;

/// Suggestions keyed by lowercased text. The first spelling seen is the one
/// displayed; repeats add to the count and keep the higher-priority type.
#[derive(Debug, Default)]
pub struct SuggestionTally {
    items: Vec<SuggestionItem>,
    index: HashMap<String, usize>,
}

impl SuggestionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str, kind: SuggestionType) {
        self.add_count(text, 1, kind);
    }

    pub fn add_all<I>(&mut self, texts: I, kind: SuggestionType)
    where
        I: IntoIterator<Item = String>,
    {
        for text in texts {
            self.add(&text, kind);
        }
    }

    fn add_count(&mut self, text: &str, count: usize, kind: SuggestionType) {
        let key = text.to_lowercase();
        match self.index.get(&key) {
            Some(&pos) => {
                let item = &mut self.items[pos];
                item.count += count;
                item.kind = item.kind.preferred(kind);
            }
            None => {
                self.index.insert(key, self.items.len());
                self.items.push(SuggestionItem {
                    text: text.to_string(),
                    count,
                    kind,
                });
            }
        }
    }

    /// Fold another tally in, summing counts on shared keys.
    pub fn merge(&mut self, other: SuggestionTally) {
        for item in other.items {
            self.add_count(&item.text, item.count, item.kind);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ranked by count, then type priority, cut to `limit`.
    pub fn into_ranked(self, limit: usize) -> Vec<SuggestionItem> {
        let mut items = self.items;
        rank_suggestions(&mut items);
        items.truncate(limit);
        items
    }
}
