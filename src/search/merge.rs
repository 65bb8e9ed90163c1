// file: src/search/merge.rs
// description: combine metadata and content results into one entry per document

use crate::models::SearchResult;
use std::collections::HashMap;

/// One result per document id. Metadata results keep their order, content-only
/// results follow in scan order.
pub fn merge_results(metadata: Vec<SearchResult>, content: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut merged: Vec<SearchResult> = Vec::with_capacity(metadata.len() + content.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in metadata.into_iter().chain(content) {
        match index.get(&result.id) {
            Some(&pos) => merge_pair(&mut merged[pos], result),
            None => {
                index.insert(result.id.clone(), merged.len());
                merged.push(result);
            }
        }
    }

    merged
}

/// Fold `other` into `into`: the better score wins, match types are unioned,
/// match counts add up and the first available preview is kept.
pub fn merge_pair(into: &mut SearchResult, other: SearchResult) {
    into.set_relevance(into.relevance_score.max(other.relevance_score));
    into.match_type.widen(&other.match_type);
    into.match_count += other.match_count;
    if into.content_preview.is_none() {
        into.content_preview = other.content_preview;
    }
}

/// Drop results that never matched anything worth scoring.
pub fn retain_relevant(results: &mut Vec<SearchResult>) {
    results.retain(|r| r.relevance_score > 0.0);
}
