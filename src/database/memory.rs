// file: src/database/memory.rs
// description: JSON corpus backed document store with per-scan record decoding
// reference: https://docs.rs/serde_json

use crate::database::store::{DocumentStore, InstitutionFilter, InstitutionSource, TypeCount};
use crate::error::{Result, SearchError};
use crate::models::{ContentRecord, Document, Institution, MetadataField};
use crate::search::Matcher;
use crate::utils::Validator;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tokio::task;
use tracing::{debug, info};
use walkdir::WalkDir;

/// On-disk corpus layout. The Turkish collection names (`kurumlar`,
/// `metadata`, `content`) are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
struct CorpusFile {
    #[serde(default, alias = "kurumlar")]
    institutions: Vec<Value>,
    #[serde(default, alias = "metadata")]
    documents: Vec<Value>,
    #[serde(default, alias = "content")]
    contents: Vec<Value>,
}

/// Keeps records as raw JSON and decodes them on every scan, so one
/// malformed record only drops out of the results it would have appeared in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    institutions: Vec<Value>,
    documents: Vec<Value>,
    contents: Vec<Value>,
}

impl MemoryStore {
    /// Load a corpus file, or every `*.json` file below a directory.
    pub fn open(path: &Path) -> Result<Self> {
        Validator::validate_corpus_path(path)?;

        let mut store = Self::default();

        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| SearchError::upstream("corpus scan", e))?;
                if entry.file_type().is_file() && Validator::is_json(entry.path()) {
                    store.extend(Self::read_corpus_file(entry.path())?);
                }
            }
        } else {
            store.extend(Self::read_corpus_file(path)?);
        }

        info!(
            "Loaded corpus from {}: {} institutions, {} documents, {} content records",
            path.display(),
            store.institutions.len(),
            store.documents.len(),
            store.contents.len()
        );

        Ok(store)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let corpus: CorpusFile = serde_json::from_str(raw)
            .map_err(|e| SearchError::upstream("corpus decode", e))?;

        let mut store = Self::default();
        store.extend(corpus);
        Ok(store)
    }

    pub fn from_records(
        institutions: Vec<Institution>,
        documents: Vec<Document>,
        contents: Vec<ContentRecord>,
    ) -> Result<Self> {
        Ok(Self {
            institutions: to_values(institutions)?,
            documents: to_values(documents)?,
            contents: to_values(contents)?,
        })
    }

    fn read_corpus_file(path: &Path) -> Result<CorpusFile> {
        let raw = fs::read_to_string(path).map_err(|source| SearchError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            SearchError::upstream("corpus decode", format!("{}: {}", path.display(), e))
        })
    }

    fn extend(&mut self, corpus: CorpusFile) {
        self.institutions.extend(corpus.institutions);
        self.documents.extend(corpus.documents);
        self.contents.extend(corpus.contents);
    }

    fn active_documents<'a>(
        &'a self,
        filter: &'a InstitutionFilter,
    ) -> impl Iterator<Item = Document> + 'a {
        decode_all::<Document>(&self.documents, "document")
            .filter(move |doc| doc.is_active() && filter.admits(&doc.institution_id))
    }
}

/// Records decoded between yields to the runtime during a scan.
const YIELD_EVERY: usize = 256;

/// Yield every `YIELD_EVERY` records so a timed-out request stops scanning.
async fn checkpoint(scanned: usize) {
    if scanned > 0 && scanned % YIELD_EVERY == 0 {
        task::yield_now().await;
    }
}

fn to_values<T: serde::Serialize>(records: Vec<T>) -> Result<Vec<Value>> {
    records
        .into_iter()
        .map(|record| serde_json::to_value(record).map_err(SearchError::from))
        .collect()
}

fn decode_all<'a, T: DeserializeOwned>(
    records: &'a [Value],
    kind: &'static str,
) -> impl Iterator<Item = T> + 'a {
    records
        .iter()
        .enumerate()
        .filter_map(move |(idx, raw)| match T::deserialize(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(kind, idx, error = %e, "skipping undecodable record");
                None
            }
        })
}

impl DocumentStore for MemoryStore {
    async fn find_active_by_field_match(
        &self,
        fields: &[MetadataField],
        matcher: &dyn Matcher,
        filter: &InstitutionFilter,
        limit: usize,
    ) -> Result<Vec<Document>> {
        if filter.is_unsatisfiable() || fields.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = Vec::new();
        for (scanned, doc) in self.active_documents(filter).enumerate() {
            checkpoint(scanned).await;
            if fields.iter().any(|field| matcher.is_match(doc.field(*field))) {
                hits.push(doc);
            }
        }

        // undated documents sort last
        hits.sort_by(|a, b| b.published_on().cmp(&a.published_on()));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn find_active_by_ids(
        &self,
        ids: &[String],
        filter: &InstitutionFilter,
    ) -> Result<Vec<Document>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut found: HashMap<String, Document> = HashMap::with_capacity(wanted.len());
        for (scanned, doc) in self.active_documents(filter).enumerate() {
            checkpoint(scanned).await;
            if wanted.contains(doc.id.as_str()) {
                found.insert(doc.id.clone(), doc);
            }
        }

        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    async fn count_active_by_filter(&self, filter: &InstitutionFilter) -> Result<u64> {
        let mut count = 0u64;
        for (scanned, _) in self.active_documents(filter).enumerate() {
            checkpoint(scanned).await;
            count += 1;
        }
        Ok(count)
    }

    async fn count_active_by_document_type(&self) -> Result<Vec<TypeCount>> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (scanned, doc) in self.active_documents(&InstitutionFilter::Any).enumerate() {
            checkpoint(scanned).await;
            *counts.entry(doc.document_type).or_default() += 1;
        }

        let mut counts: Vec<TypeCount> = counts
            .into_iter()
            .map(|(document_type, count)| TypeCount {
                document_type,
                count,
            })
            .collect();
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.document_type.cmp(&b.document_type))
        });
        Ok(counts)
    }

    async fn find_content_by_body_match(
        &self,
        matcher: &dyn Matcher,
        document_ids: Option<&[String]>,
        limit: usize,
    ) -> Result<Vec<ContentRecord>> {
        let allowed: Option<HashSet<&str>> =
            document_ids.map(|ids| ids.iter().map(String::as_str).collect());

        let mut matched = Vec::new();
        for (scanned, record) in decode_all::<ContentRecord>(&self.contents, "content").enumerate() {
            if matched.len() >= limit {
                break;
            }
            checkpoint(scanned).await;

            let admitted = allowed
                .as_ref()
                .is_none_or(|ids| ids.contains(record.metadata_id.as_str()));
            if admitted && matcher.is_match(&record.body) {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    async fn find_content_by_metadata_id(&self, metadata_id: &str) -> Result<Option<ContentRecord>> {
        Ok(decode_all::<ContentRecord>(&self.contents, "content")
            .find(|record| record.metadata_id == metadata_id))
    }
}

impl InstitutionSource for MemoryStore {
    async fn load_institutions(&self) -> Result<Vec<Institution>> {
        Ok(decode_all::<Institution>(&self.institutions, "institution").collect())
    }
}
