// file: src/search/paginate.rs
// description: offset/limit windowing over a fully ranked result list

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches before pagination
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Window `[offset, offset + limit)`, truncated at the end of `items`. An
/// offset past the end yields an empty page, not an error.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Page<T> {
    let total = items.len();
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);

    Page {
        items: items.into_iter().skip(start).take(end - start).collect(),
        total,
        limit,
        offset,
    }
}
