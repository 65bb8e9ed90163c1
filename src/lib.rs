// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod search;
pub mod utils;

pub use api::{ApiReply, ApiResponse, Method, handle_autocomplete, handle_search};
pub use config::{
    AutocompleteConfig, CacheConfig, Config, DatabaseConfig, ScoringConfig, SearchConfig,
};
pub use database::{
    DocumentStore, InstitutionCache, InstitutionFilter, InstitutionSource, MemoryStore, TypeCount,
};
pub use error::{Result, SearchError};
pub use models::{
    ContentRecord, Document, Institution, MatchType, SearchResult, SuggestionItem, SuggestionType,
};
pub use search::{EngineStats, Matcher, Page, RawParams, SearchEngine, SubstringMatcher};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert_eq!(config.search.max_limit, 100);
        let _cache = InstitutionCache::new();
        let _params = RawParams::query("vergi");
    }
}
