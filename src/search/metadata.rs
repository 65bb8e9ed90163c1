// file: src/search/metadata.rs
// description: metadata field scan and additive field-weight scoring

use crate::database::{DocumentStore, InstitutionFilter};
use crate::error::Result;
use crate::models::{Document, MatchField, MatchType, MetadataField, SearchResult};
use crate::search::scoring::ScoringContext;
use crate::utils::OperationTimer;

/// Fields the store is asked to match for a search. The institution name is
/// scored but not scanned: it lives in the cache, not on the document.
pub const SEARCH_FIELDS: [MetadataField; 4] = [
    MetadataField::Title,
    MetadataField::Description,
    MetadataField::Keywords,
    MetadataField::Tags,
];

/// Fetch up to `limit` matching documents and score each once.
pub async fn scan<S: DocumentStore>(
    store: &S,
    ctx: &ScoringContext<'_>,
    filter: &InstitutionFilter,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    let timer = OperationTimer::new("metadata scan");

    let documents = store
        .find_active_by_field_match(&SEARCH_FIELDS, ctx.matcher, filter, limit)
        .await?;

    let results: Vec<SearchResult> = documents.iter().map(|doc| score_document(doc, ctx)).collect();

    timer.finish_with_count(results.len());
    Ok(results)
}

/// Score one document. Weights add up over every matched field; the match
/// type is the highest-priority field that matched.
pub fn score_document(doc: &Document, ctx: &ScoringContext<'_>) -> SearchResult {
    let weights = ctx.weights;
    let fields = [
        (MatchField::Title, doc.title.as_str(), weights.title),
        (MatchField::Institution, ctx.institution_name(doc), weights.institution),
        (MatchField::Tags, doc.tags.as_str(), weights.tags),
        (MatchField::Keywords, doc.keywords.as_str(), weights.keywords),
        (MatchField::Description, doc.description.as_str(), weights.description),
    ];

    let mut score = 0.0;
    let mut match_count = 0;
    let mut primary = None;

    for (field, text, weight) in fields {
        let occurrences = ctx.matcher.count(text);
        if occurrences > 0 {
            score += weight;
            match_count += occurrences;
            primary.get_or_insert(field);
        }
    }

    let match_type = MatchType::single(primary.unwrap_or(MatchField::Description));
    let mut result = SearchResult::for_document(
        doc,
        ctx.institution_of(doc),
        match_type,
        ctx.description_max_chars,
    );
    result.set_relevance(score);
    result.match_count = match_count;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::database::{InstitutionSnapshot, MemoryStore};
    use crate::models::{DocumentStatus, Institution};
    use crate::search::SubstringMatcher;
    use pretty_assertions::assert_eq;

    fn doc(id: &str, title: &str, tags: &str, keywords: &str, description: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            institution_id: "k1".to_string(),
            document_type: String::new(),
            legal_status: String::new(),
            publication_date: String::new(),
            tags: tags.to_string(),
            keywords: keywords.to_string(),
            description: description.to_string(),
            url_slug: String::new(),
            status: DocumentStatus::Active,
        }
    }

    fn institutions() -> InstitutionSnapshot {
        InstitutionSnapshot::new(vec![Institution::new("k1", "Vergi Denetim Kurulu")])
    }

    #[test]
    fn test_weights_are_additive() {
        let matcher = SubstringMatcher::new("vergi").unwrap();
        let weights = ScoringConfig::default();
        let institutions = institutions();
        let ctx = ScoringContext {
            matcher: &matcher,
            weights: &weights,
            institutions: &institutions,
            description_max_chars: 200,
        };

        let result = score_document(
            &doc("d1", "Vergi Tebliği", "vergi, kdv", "vergi vergi", "gelir vergisi"),
            &ctx,
        );

        // title 10 + institution 5 + tags 3 + keywords 2 + description 1
        assert_eq!(result.relevance_score, 21.0);
        assert_eq!(result.match_type.to_string(), "title");
        assert_eq!(result.match_count, 6);
        assert_eq!(result.institution_name, "Vergi Denetim Kurulu");
    }

    #[test]
    fn test_match_type_follows_priority() {
        let matcher = SubstringMatcher::new("kdv").unwrap();
        let weights = ScoringConfig::default();
        let institutions = institutions();
        let ctx = ScoringContext {
            matcher: &matcher,
            weights: &weights,
            institutions: &institutions,
            description_max_chars: 200,
        };

        let keywords = score_document(&doc("d1", "Tebliğ", "", "kdv", "kdv oranları"), &ctx);
        assert_eq!(keywords.match_type.to_string(), "keywords");
        assert_eq!(keywords.relevance_score, 3.0);

        let description = score_document(&doc("d2", "Tebliğ", "", "", "KDV"), &ctx);
        assert_eq!(description.match_type.to_string(), "description");
        assert_eq!(description.relevance_score, 1.0);
    }

    #[tokio::test]
    async fn test_scan_returns_one_result_per_document() {
        let store = MemoryStore::from_records(
            vec![],
            vec![
                doc("d1", "Vergi Tebliği", "vergi", "vergi", "vergi"),
                doc("d2", "Gümrük", "", "", "vergi muafiyeti"),
                doc("d3", "Gümrük", "", "", ""),
            ],
            vec![],
        )
        .unwrap();
        let matcher = SubstringMatcher::new("vergi").unwrap();
        let weights = ScoringConfig::default();
        let institutions = InstitutionSnapshot::default();
        let ctx = ScoringContext {
            matcher: &matcher,
            weights: &weights,
            institutions: &institutions,
            description_max_chars: 200,
        };

        let results = scan(&store, &ctx, &InstitutionFilter::Any, 10).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
        assert_eq!(results[0].relevance_score, 16.0);
    }
}
