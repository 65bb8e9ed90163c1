// file: src/api/mod.rs
// description: transport-neutral http endpoint layer
// reference: internal module structure

pub mod handlers;
pub mod response;

pub use handlers::{Method, SuggestionList, handle_autocomplete, handle_search, params_from_pairs};
pub use response::{ApiReply, ApiResponse};
