// file: src/search/mod.rs
// description: search pipeline module exports
// reference: internal module structure

pub mod content;
pub mod engine;
pub mod matcher;
pub mod merge;
pub mod metadata;
pub mod paginate;
pub mod query;
pub mod ranking;
pub mod scoring;

pub use engine::{EngineStats, SearchEngine};
pub use matcher::{Matcher, SubstringMatcher};
pub use paginate::Page;
pub use query::{NormalizedQuery, QueryNormalizer, RawParams};
pub use scoring::ScoringContext;
