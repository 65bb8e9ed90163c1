// file: src/autocomplete/mod.rs
// description: autocomplete suggestion module exports
// reference: internal module structure

pub mod aggregator;
pub mod suggest;
pub mod tokens;

pub use aggregator::SuggestionTally;
pub use suggest::{SuggestionContext, suggest};
pub use tokens::{clean_token, extract_phrases, extract_tokens};
