// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod institution;
pub mod search_result;
pub mod suggestion;

pub use document::{ContentRecord, Document, DocumentStatus, MetadataField};
pub use institution::Institution;
pub use search_result::{MatchField, MatchType, SearchResult};
pub use suggestion::{SuggestionItem, SuggestionType};
