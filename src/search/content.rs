// file: src/search/content.rs
// description: full-text body scan, occurrence/density scoring and preview extraction

use crate::config::ScoringConfig;
use crate::database::{DocumentStore, InstitutionFilter};
use crate::error::Result;
use crate::models::{ContentRecord, Document, MatchField, MatchType, SearchResult};
use crate::search::Matcher;
use crate::search::scoring::{PREVIEW_FALLBACK_CHARS, PREVIEW_RADIUS_CHARS, ScoringContext};
use crate::utils::{OperationTimer, Validator};
use std::collections::HashSet;

/// Scan up to `limit` content bodies and score each against its document.
pub async fn scan<S: DocumentStore>(
    store: &S,
    ctx: &ScoringContext<'_>,
    filter: &InstitutionFilter,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    let timer = OperationTimer::new("content scan");

    let results: Vec<SearchResult> = matched_documents(store, ctx.matcher, filter, limit)
        .await?
        .into_iter()
        .map(|(doc, record)| score_content(&doc, &record, ctx))
        .collect();

    timer.finish_with_count(results.len());
    Ok(results)
}

/// Content records matching the query, paired with their active documents.
/// Records whose document is missing, inactive or filtered out are dropped.
pub async fn matched_documents<S: DocumentStore>(
    store: &S,
    matcher: &dyn Matcher,
    filter: &InstitutionFilter,
    limit: usize,
) -> Result<Vec<(Document, ContentRecord)>> {
    // an unsatisfiable filter admits no document, so no body is worth reading
    let restrict: Option<&[String]> = filter.is_unsatisfiable().then_some(&[][..]);

    let records = store
        .find_content_by_body_match(matcher, restrict, limit)
        .await?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|r| seen.insert(r.metadata_id.as_str()))
            .map(|r| r.metadata_id.clone())
            .collect()
    };

    let documents = store.find_active_by_ids(&ids, filter).await?;

    Ok(records
        .into_iter()
        .filter_map(|record| {
            documents
                .iter()
                .find(|doc| doc.id == record.metadata_id)
                .map(|doc| (doc.clone(), record))
        })
        .collect())
}

pub fn score_content(doc: &Document, record: &ContentRecord, ctx: &ScoringContext<'_>) -> SearchResult {
    let (score, occurrences) = content_score(&record.body, ctx.matcher, ctx.weights);

    let mut result = SearchResult::for_document(
        doc,
        ctx.institution_of(doc),
        MatchType::single(MatchField::Content),
        ctx.description_max_chars,
    );
    result.set_relevance(score);
    result.match_count = occurrences;
    result.content_preview = Some(content_preview(&record.body, ctx.matcher));
    result
}

/// Occurrence weight plus a density bonus: the share of the body the matches
/// cover, scaled. Lengths are in characters.
pub fn content_score(body: &str, matcher: &dyn Matcher, weights: &ScoringConfig) -> (f64, usize) {
    let occurrences = matcher.count(body);
    let body_chars = body.chars().count();
    if occurrences == 0 || body_chars == 0 {
        return (0.0, occurrences);
    }

    let query_chars = matcher.query().chars().count();
    let density = (query_chars * occurrences) as f64 / body_chars as f64;
    let score = occurrences as f64 * weights.content_occurrence + density * weights.density_scale;

    (score, occurrences)
}

/// Window of body text around the first match, with "..." where cut.
pub fn content_preview(body: &str, matcher: &dyn Matcher) -> String {
    let Some(found) = matcher.find(body) else {
        return Validator::truncate_text(body, PREVIEW_FALLBACK_CHARS);
    };

    let match_start = body[..found.start].chars().count();
    let match_end = match_start + body[found.clone()].chars().count();
    let total = match_start + body[found.start..].chars().count();

    let start = match_start.saturating_sub(PREVIEW_RADIUS_CHARS);
    let end = (match_end + PREVIEW_RADIUS_CHARS).min(total);

    let mut preview = String::new();
    if start > 0 {
        preview.push_str("...");
    }
    preview.extend(body.chars().skip(start).take(end - start));
    if end < total {
        preview.push_str("...");
    }
    preview
}
