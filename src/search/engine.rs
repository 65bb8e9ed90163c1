// file: src/search/engine.rs
// description: request orchestration for search, autocomplete, highlight and diagnostics
// reference: https://docs.rs/tokio/latest/tokio/time/fn.timeout.html

use crate::autocomplete::{SuggestionContext, suggest};
use crate::config::Config;
use crate::database::{
    DocumentStore, InstitutionCache, InstitutionFilter, InstitutionSource, TypeCount,
};
use crate::error::{Result, SearchError};
use crate::models::{SearchResult, SuggestionItem};
use crate::search::merge::{merge_pair, merge_results, retain_relevant};
use crate::search::paginate::{Page, paginate};
use crate::search::query::{QueryNormalizer, RawParams};
use crate::search::ranking::rank_results;
use crate::search::scoring::ScoringContext;
use crate::search::{SubstringMatcher, content, metadata};
use crate::utils::{HealthCheck, HealthReport, OperationTimer, Validator};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

/// Display label for documents without a type.
pub const UNSPECIFIED_DOCUMENT_TYPE: &str = "Belirtilmemiş";

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub institutions: usize,
    pub active_documents: u64,
    /// Largest group first
    pub document_types: Vec<TypeCount>,
}

/// Entry point for every read request. Cheap to clone; clones share the store
/// and the institution cache.
pub struct SearchEngine<S> {
    store: Arc<S>,
    institutions: InstitutionCache,
    config: Arc<Config>,
}

impl<S> Clone for SearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            institutions: self.institutions.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: DocumentStore> SearchEngine<S> {
    pub fn new(store: Arc<S>, institutions: InstitutionCache, config: Arc<Config>) -> Self {
        Self {
            store,
            institutions,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn institutions(&self) -> &InstitutionCache {
        &self.institutions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ranked, paginated search over metadata and content.
    pub async fn search(&self, params: &RawParams) -> Result<Page<SearchResult>> {
        let span = info_span!("search", request_id = %Uuid::new_v4());
        with_timeout("search", self.config.search.timeout(), self.run_search(params))
            .instrument(span)
            .await
    }

    /// Ranked suggestions for a partial query.
    pub async fn autocomplete(&self, params: &RawParams) -> Result<Vec<SuggestionItem>> {
        let span = info_span!("autocomplete", request_id = %Uuid::new_v4());
        with_timeout(
            "autocomplete",
            self.config.autocomplete.timeout(),
            self.run_autocomplete(params),
        )
        .instrument(span)
        .await
    }

    /// Score one active document against `query`, with a preview of its body.
    pub async fn highlight(&self, document_id: &str, query: &str) -> Result<SearchResult> {
        let span = info_span!("highlight", request_id = %Uuid::new_v4(), document_id);
        with_timeout(
            "highlight",
            self.config.search.timeout(),
            self.run_highlight(document_id, query),
        )
        .instrument(span)
        .await
    }

    pub async fn stats(&self) -> Result<EngineStats> {
        let institutions = self.institutions.snapshot().await.len();
        let (active_documents, mut document_types) = tokio::try_join!(
            self.store.count_active_by_filter(&InstitutionFilter::Any),
            self.store.count_active_by_document_type(),
        )?;

        for group in document_types
            .iter_mut()
            .filter(|group| group.document_type.trim().is_empty())
        {
            group.document_type = UNSPECIFIED_DOCUMENT_TYPE.to_string();
        }

        Ok(EngineStats {
            institutions,
            active_documents,
            document_types,
        })
    }

    /// Probe the store and the institution cache.
    pub async fn verify(&self) -> HealthReport {
        let mut checks = Vec::new();

        let start = Instant::now();
        let store_check = match self
            .store
            .count_active_by_filter(&InstitutionFilter::Any)
            .await
        {
            Ok(0) => HealthCheck::degraded(
                "document_store",
                "no active documents".to_string(),
                start.elapsed(),
            ),
            Ok(count) => HealthCheck::healthy(
                "document_store",
                Some(format!("{count} active documents")),
                start.elapsed(),
            ),
            Err(e) => HealthCheck::unhealthy("document_store", e.to_string(), start.elapsed()),
        };
        checks.push(store_check);

        let start = Instant::now();
        let snapshot = self.institutions.snapshot().await;
        let cache_check = if snapshot.is_empty() {
            HealthCheck::degraded(
                "institution_cache",
                "cache is empty".to_string(),
                start.elapsed(),
            )
        } else {
            HealthCheck::healthy(
                "institution_cache",
                Some(format!("{} institutions", snapshot.len())),
                start.elapsed(),
            )
        };
        checks.push(cache_check);

        HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string())
    }

    /// Candidates fetched per scan. Independent of the offset, so every page
    /// of a query with the same limit ranks the same candidate set.
    fn candidate_limit(&self, limit: usize) -> usize {
        limit.saturating_mul(self.config.search.overfetch_factor)
    }

    async fn run_search(&self, params: &RawParams) -> Result<Page<SearchResult>> {
        let timer = OperationTimer::new("search");
        let snapshot = self.institutions.snapshot().await;
        let query = QueryNormalizer::for_search(&self.config.search).normalize(params, &snapshot)?;

        let matcher = SubstringMatcher::new(&query.text)?;
        let ctx = ScoringContext {
            matcher: &matcher,
            weights: &self.config.scoring,
            institutions: &snapshot,
            description_max_chars: self.config.search.description_max_chars,
        };
        let candidates = self.candidate_limit(query.limit);

        let (metadata_hits, content_hits) = tokio::try_join!(
            metadata::scan(&*self.store, &ctx, &query.filter, candidates),
            content::scan(&*self.store, &ctx, &query.filter, candidates),
        )?;
        debug!(
            metadata = metadata_hits.len(),
            content = content_hits.len(),
            "scans finished"
        );

        let mut results = merge_results(metadata_hits, content_hits);
        retain_relevant(&mut results);
        rank_results(&mut results);

        let page = paginate(results, query.offset, query.limit);
        info!(
            query = %query.text,
            total = page.total,
            returned = page.items.len(),
            "search complete"
        );
        timer.warn_if_slow(self.config.search.timeout() / 2);
        Ok(page)
    }

    async fn run_autocomplete(&self, params: &RawParams) -> Result<Vec<SuggestionItem>> {
        let snapshot = self.institutions.snapshot().await;
        let query = QueryNormalizer::for_autocomplete(&self.config.search, &self.config.autocomplete)
            .normalize(params, &snapshot)?;

        let matcher = SubstringMatcher::new(&query.text)?;
        let ctx = SuggestionContext {
            matcher: &matcher,
            filter: &query.filter,
            institutions: &snapshot,
            config: &self.config.autocomplete,
        };

        let items = suggest(&*self.store, &ctx, query.limit).await?;
        info!(query = %query.text, returned = items.len(), "autocomplete complete");
        Ok(items)
    }

    async fn run_highlight(&self, document_id: &str, query: &str) -> Result<SearchResult> {
        let text = Validator::validate_query(Some(query), self.config.search.min_query_chars)?;
        let matcher = SubstringMatcher::new(&text)?;
        let snapshot = self.institutions.snapshot().await;
        let ctx = ScoringContext {
            matcher: &matcher,
            weights: &self.config.scoring,
            institutions: &snapshot,
            description_max_chars: self.config.search.description_max_chars,
        };

        let doc = self
            .store
            .find_active_by_ids(&[document_id.to_string()], &InstitutionFilter::Any)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NotFound(format!("document {document_id}")))?;

        let mut result = metadata::score_document(&doc, &ctx);
        if let Some(record) = self.store.find_content_by_metadata_id(&doc.id).await? {
            let body = content::score_content(&doc, &record, &ctx);
            if result.relevance_score > 0.0 {
                merge_pair(&mut result, body);
            } else {
                result = body;
            }
        }

        Ok(result)
    }
}

impl<S: DocumentStore + InstitutionSource> SearchEngine<S> {
    /// Reload the institution cache from the store.
    pub async fn refresh_institutions(&self) -> Result<usize> {
        self.institutions
            .refresh(&*self.store, self.config.cache.refresh_timeout())
            .await
    }
}

async fn with_timeout<T, F>(operation: &'static str, after: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let outcome = match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout { operation, after }),
    };

    if let Err(e) = &outcome {
        match e {
            SearchError::InvalidInput(_) | SearchError::NotFound(_) => {
                debug!(operation, error = %e, "request rejected")
            }
            _ => error!(operation, error = %e, "request failed"),
        }
    }
    outcome
}
