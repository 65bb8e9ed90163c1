// file: src/search/scoring.rs
// description: per-request scoring inputs shared by the metadata and content scans

use crate::config::ScoringConfig;
use crate::database::InstitutionSnapshot;
use crate::models::{Document, Institution};
use crate::search::Matcher;

/// Characters of context kept on each side of the first body match.
pub const PREVIEW_RADIUS_CHARS: usize = 75;

/// Preview length when the body has no match at all.
pub const PREVIEW_FALLBACK_CHARS: usize = 150;

/// Everything a scan needs to turn a document into a scored result. Borrowed
/// for one request; holds no mutable state, so both scans can share it.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    pub matcher: &'a dyn Matcher,
    pub weights: &'a ScoringConfig,
    pub institutions: &'a InstitutionSnapshot,
    pub description_max_chars: usize,
}

impl<'a> ScoringContext<'a> {
    pub fn institution_of(&self, doc: &Document) -> Option<&'a Institution> {
        self.institutions.by_id(&doc.institution_id)
    }

    /// Display name used for scoring; unknown institutions contribute nothing.
    pub fn institution_name(&self, doc: &Document) -> &'a str {
        self.institution_of(doc).map(|i| i.name.as_str()).unwrap_or("")
    }
}
