// file: src/autocomplete/suggest.rs
// description: suggestion passes over document fields, content bodies and institution names

use crate::autocomplete::aggregator::SuggestionTally;
use crate::autocomplete::tokens::{extract_phrases, extract_tokens};
use crate::config::AutocompleteConfig;
use crate::database::{DocumentStore, InstitutionFilter, InstitutionSnapshot};
use crate::error::Result;
use crate::models::{MetadataField, SuggestionItem, SuggestionType};
use crate::search::Matcher;
use crate::search::content::matched_documents;
use crate::utils::OperationTimer;
use futures::future::try_join_all;

pub const FIELD_TOKEN_MIN_CHARS: usize = 2;
pub const CONTENT_TOKEN_MIN_CHARS: usize = 3;

/// Metadata fields scanned for suggestions, in tally merge order.
const FIELD_PASSES: [(MetadataField, SuggestionType); 3] = [
    (MetadataField::Title, SuggestionType::Title),
    (MetadataField::Keywords, SuggestionType::Keyword),
    (MetadataField::Tags, SuggestionType::Tag),
];

/// Everything a suggestion request reads. Borrowed for one request.
#[derive(Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub matcher: &'a dyn Matcher,
    pub filter: &'a InstitutionFilter,
    pub institutions: &'a InstitutionSnapshot,
    pub config: &'a AutocompleteConfig,
}

/// Run every pass and return the top `limit` suggestions.
pub async fn suggest<S: DocumentStore>(
    store: &S,
    ctx: &SuggestionContext<'_>,
    limit: usize,
) -> Result<Vec<SuggestionItem>> {
    let timer = OperationTimer::new("autocomplete passes");

    let field_passes = try_join_all(
        FIELD_PASSES
            .iter()
            .map(|&(field, kind)| field_pass(store, ctx, field, kind)),
    );
    let (field_tallies, (content, phrases)) =
        tokio::try_join!(field_passes, content_pass(store, ctx))?;

    let mut tally = SuggestionTally::new();
    for other in field_tallies
        .into_iter()
        .chain([content, phrases, institution_pass(ctx)])
    {
        tally.merge(other);
    }

    timer.finish_with_count(tally.len());
    Ok(tally.into_ranked(limit))
}

async fn field_pass<S: DocumentStore>(
    store: &S,
    ctx: &SuggestionContext<'_>,
    field: MetadataField,
    kind: SuggestionType,
) -> Result<SuggestionTally> {
    let documents = store
        .find_active_by_field_match(&[field], ctx.matcher, ctx.filter, ctx.config.field_scan_limit)
        .await?;

    let mut tally = SuggestionTally::new();
    for doc in &documents {
        tally.add_all(
            extract_tokens(doc.field(field), ctx.matcher, FIELD_TOKEN_MIN_CHARS),
            kind,
        );
    }
    Ok(tally)
}

/// Body words, plus phrases when enabled. Returns (content, phrase) tallies.
async fn content_pass<S: DocumentStore>(
    store: &S,
    ctx: &SuggestionContext<'_>,
) -> Result<(SuggestionTally, SuggestionTally)> {
    let mut content = SuggestionTally::new();
    let mut phrases = SuggestionTally::new();
    if !ctx.config.include_content {
        return Ok((content, phrases));
    }

    let matched =
        matched_documents(store, ctx.matcher, ctx.filter, ctx.config.content_scan_limit).await?;

    for (_, record) in &matched {
        content.add_all(
            extract_tokens(&record.body, ctx.matcher, CONTENT_TOKEN_MIN_CHARS),
            SuggestionType::Content,
        );
        if ctx.config.include_phrases {
            phrases.add_all(extract_phrases(&record.body, ctx.matcher), SuggestionType::Phrase);
        }
    }

    Ok((content, phrases))
}

/// Words from cached institution names. Not restricted by the request's
/// institution filter.
fn institution_pass(ctx: &SuggestionContext<'_>) -> SuggestionTally {
    let mut tally = SuggestionTally::new();
    for institution in ctx.institutions.all() {
        if ctx.matcher.is_match(&institution.name) {
            tally.add_all(
                extract_tokens(&institution.name, ctx.matcher, FIELD_TOKEN_MIN_CHARS),
                SuggestionType::Institution,
            );
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::MemoryStore;
    use crate::models::Institution;
    use crate::search::SubstringMatcher;
    use pretty_assertions::assert_eq;

    const CORPUS: &str = r#"{
        "kurumlar": [
            {"_id": "k1", "kurum_adi": "Vergi Denetim Kurulu"},
            {"_id": "k2", "kurum_adi": "Sanayi ve Teknoloji Bakanlığı"}
        ],
        "metadata": [
            {"_id": "d1", "pdf_adi": "Vergi Usul Kanunu", "kurum_id": "k1",
             "etiketler": "kanun", "status": "aktif"},
            {"_id": "d2", "pdf_adi": "Vergi Tebliği", "kurum_id": "k1",
             "etiketler": "Vergisi, tebliğ", "status": "aktif"},
            {"_id": "d3", "pdf_adi": "Vergi Denetimi", "kurum_id": "k2",
             "etiketler": "denetim", "status": "aktif"},
            {"_id": "d4", "pdf_adi": "Vergi Arşivi", "kurum_id": "k1",
             "status": "pasif"}
        ],
        "content": [
            {"_id": "c1", "metadata_id": "d2", "icerik": "Gelir vergisi genel tebliği"}
        ]
    }"#;

    fn context<'a>(
        matcher: &'a SubstringMatcher,
        filter: &'a InstitutionFilter,
        institutions: &'a InstitutionSnapshot,
        config: &'a AutocompleteConfig,
    ) -> SuggestionContext<'a> {
        SuggestionContext {
            matcher,
            filter,
            institutions,
            config,
        }
    }

    fn snapshot() -> InstitutionSnapshot {
        InstitutionSnapshot::new(vec![
            Institution::new("k1", "Vergi Denetim Kurulu"),
            Institution::new("k2", "Sanayi ve Teknoloji Bakanlığı"),
        ])
    }

    #[tokio::test]
    async fn test_title_suggestion_outranks_tag() {
        let store = MemoryStore::from_json(CORPUS).unwrap();
        let matcher = SubstringMatcher::new("ver").unwrap();
        let config = AutocompleteConfig {
            include_content: false,
            ..Config::default_config().autocomplete
        };
        let institutions = InstitutionSnapshot::default();

        let items = suggest(
            &store,
            &context(&matcher, &InstitutionFilter::Any, &institutions, &config),
            10,
        )
        .await
        .unwrap();

        assert_eq!(
            items,
            vec![
                SuggestionItem {
                    text: "Vergi".to_string(),
                    count: 3,
                    kind: SuggestionType::Title,
                },
                SuggestionItem {
                    text: "Vergisi".to_string(),
                    count: 1,
                    kind: SuggestionType::Tag,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_content_and_institution_passes() {
        let store = MemoryStore::from_json(CORPUS).unwrap();
        let matcher = SubstringMatcher::new("vergi").unwrap();
        let config = Config::default_config().autocomplete;
        let institutions = snapshot();

        let items = suggest(
            &store,
            &context(&matcher, &InstitutionFilter::Any, &institutions, &config),
            10,
        )
        .await
        .unwrap();

        // three titles plus the institution name fold into one entry; the
        // tag and the body word share the lowercase key "vergisi"
        assert_eq!(items[0].text, "Vergi");
        assert_eq!(items[0].count, 4);
        assert_eq!(items[0].kind, SuggestionType::Title);
        assert_eq!(items[1].text, "Vergisi");
        assert_eq!(items[1].count, 2);
        assert_eq!(items[1].kind, SuggestionType::Tag);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_phrases_when_enabled() {
        let store = MemoryStore::from_json(CORPUS).unwrap();
        let matcher = SubstringMatcher::new("gelir").unwrap();
        let config = AutocompleteConfig {
            include_phrases: true,
            ..Config::default_config().autocomplete
        };
        let institutions = InstitutionSnapshot::default();

        let items = suggest(
            &store,
            &context(&matcher, &InstitutionFilter::Any, &institutions, &config),
            10,
        )
        .await
        .unwrap();

        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Gelir vergisi",
                "Gelir vergisi genel",
                "Gelir vergisi genel tebliği",
                "Gelir",
            ]
        );
    }

    #[tokio::test]
    async fn test_filter_restricts_document_passes() {
        let store = MemoryStore::from_json(CORPUS).unwrap();
        let matcher = SubstringMatcher::new("ver").unwrap();
        let config = Config::default_config().autocomplete;
        let institutions = InstitutionSnapshot::default();
        let filter = InstitutionFilter::Institution("k2".to_string());

        let items = suggest(&store, &context(&matcher, &filter, &institutions, &config), 10)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].count, 1);

        let none = suggest(
            &store,
            &context(&matcher, &InstitutionFilter::Unsatisfiable, &institutions, &config),
            10,
        )
        .await
        .unwrap();
        assert!(none.is_empty());
    }
}
