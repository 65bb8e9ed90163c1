// file: src/database/store.rs
// description: document store and institution source interfaces consumed by the engines

use crate::error::Result;
use crate::models::{ContentRecord, Document, Institution, MetadataField};
use crate::search::Matcher;
use serde::Serialize;
use std::future::Future;

/// Institution restriction applied to every scan of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstitutionFilter {
    Any,
    Institution(String),
    /// A filter was requested but named no known institution.
    Unsatisfiable,
}

impl InstitutionFilter {
    pub fn admits(&self, institution_id: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Institution(id) => id == institution_id,
            Self::Unsatisfiable => false,
        }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }
}

/// Number of active documents sharing one `document_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub document_type: String,
    pub count: u64,
}

/// Read access to document metadata and content.
///
/// Only active documents are ever returned from the metadata side. Records
/// that fail to decode are skipped; an `Err` means the scan as a whole failed.
pub trait DocumentStore: Send + Sync {
    /// Active documents admitted by `filter` where any of `fields` matches,
    /// newest publication first, at most `limit`.
    fn find_active_by_field_match(
        &self,
        fields: &[MetadataField],
        matcher: &dyn Matcher,
        filter: &InstitutionFilter,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Document>>> + Send;

    /// Active documents among `ids` admitted by `filter`, in `ids` order.
    fn find_active_by_ids(
        &self,
        ids: &[String],
        filter: &InstitutionFilter,
    ) -> impl Future<Output = Result<Vec<Document>>> + Send;

    fn count_active_by_filter(
        &self,
        filter: &InstitutionFilter,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Active documents grouped by `document_type`, largest group first and
    /// ties by type name. Documents without a type share the empty name.
    fn count_active_by_document_type(
        &self,
    ) -> impl Future<Output = Result<Vec<TypeCount>>> + Send;

    /// Content records whose body matches. `document_ids`, when given,
    /// restricts the scan to those metadata ids.
    fn find_content_by_body_match(
        &self,
        matcher: &dyn Matcher,
        document_ids: Option<&[String]>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContentRecord>>> + Send;

    fn find_content_by_metadata_id(
        &self,
        metadata_id: &str,
    ) -> impl Future<Output = Result<Option<ContentRecord>>> + Send;
}

/// Where the institution cache loads its snapshot from.
pub trait InstitutionSource: Send + Sync {
    fn load_institutions(&self) -> impl Future<Output = Result<Vec<Institution>>> + Send;
}
