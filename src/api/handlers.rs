// file: src/api/handlers.rs
// description: search and autocomplete endpoint handlers over raw request parameters

use crate::api::response::{ApiReply, ApiResponse, HEADER_LIMIT, HEADER_OFFSET, HEADER_TOTAL_COUNT};
use crate::database::DocumentStore;
use crate::models::SuggestionItem;
use crate::search::{RawParams, SearchEngine};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Options,
    Other(String),
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "OPTIONS" => Self::Options,
            other => Self::Other(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionList {
    pub suggestions: Vec<SuggestionItem>,
}

/// Collect known parameters from decoded query-string pairs. Unknown keys are
/// ignored; a repeated key keeps its last value.
pub fn params_from_pairs<'a, I>(pairs: I) -> RawParams
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut params = RawParams::default();
    for (key, value) in pairs {
        let slot = match key {
            "q" => &mut params.q,
            "kurum" => &mut params.kurum,
            "kurum_id" => &mut params.kurum_id,
            "limit" => &mut params.limit,
            "offset" => &mut params.offset,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }
    params
}

fn preflight(method: &Method) -> Option<ApiReply> {
    match method {
        Method::Get => None,
        Method::Options => Some(ApiReply::empty(200)),
        Method::Other(name) => {
            debug!(method = %name, "method not allowed");
            Some(ApiReply::empty(405).with_header("Allow", "GET, OPTIONS"))
        }
    }
}

pub async fn handle_search<S: DocumentStore>(
    engine: &SearchEngine<S>,
    method: &Method,
    params: &RawParams,
) -> ApiReply {
    if let Some(reply) = preflight(method) {
        return reply;
    }

    match engine.search(params).await {
        Ok(page) => {
            let count = page.items.len();
            ApiReply::json(200, &ApiResponse::ok(&page.items, count))
                .with_header(HEADER_TOTAL_COUNT, page.total)
                .with_header(HEADER_LIMIT, page.limit)
                .with_header(HEADER_OFFSET, page.offset)
        }
        Err(e) => ApiReply::from_error(&e),
    }
}

pub async fn handle_autocomplete<S: DocumentStore>(
    engine: &SearchEngine<S>,
    method: &Method,
    params: &RawParams,
) -> ApiReply {
    if let Some(reply) = preflight(method) {
        return reply;
    }

    match engine.autocomplete(params).await {
        Ok(suggestions) => {
            let count = suggestions.len();
            ApiReply::json(200, &ApiResponse::ok(SuggestionList { suggestions }, count))
        }
        Err(e) => ApiReply::from_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::{InstitutionCache, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::sync::Arc;

    const CORPUS: &str = r#"{
        "kurumlar": [{"_id": "k1", "kurum_adi": "Hazine ve Maliye Bakanlığı"}],
        "metadata": [
            {"_id": "d1", "pdf_adi": "Vergi Usul Kanunu", "kurum_id": "k1", "status": "aktif",
             "belge_yayin_tarihi": "2024-02-01"},
            {"_id": "d2", "pdf_adi": "Vergi Tebliği", "kurum_id": "k1", "status": "aktif",
             "belge_yayin_tarihi": "2024-01-01", "etiketler": "Vergisi"},
            {"_id": "d3", "pdf_adi": "Vergi Rehberi", "kurum_id": "k1", "status": "aktif"}
        ],
        "content": []
    }"#;

    async fn engine() -> SearchEngine<MemoryStore> {
        let engine = SearchEngine::new(
            Arc::new(MemoryStore::from_json(CORPUS).unwrap()),
            InstitutionCache::new(),
            Arc::new(Config::default_config()),
        );
        engine.refresh_institutions().await.unwrap();
        engine
    }

    fn body(reply: &ApiReply) -> Value {
        serde_json::from_str(reply.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_params_from_pairs() {
        let params = params_from_pairs([("q", "vergi"), ("limit", "abc"), ("page", "2"), ("q", "kdv")]);
        assert_eq!(params.q.as_deref(), Some("kdv"));
        assert_eq!(params.limit.as_deref(), Some("abc"));
        assert_eq!(params.offset, None);
    }

    #[tokio::test]
    async fn test_search_reply_headers() {
        let engine = engine().await;
        let params = params_from_pairs([("q", "vergi"), ("limit", "2"), ("offset", "1")]);

        let reply = handle_search(&engine, &Method::Get, &params).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.header(HEADER_TOTAL_COUNT), Some("3"));
        assert_eq!(reply.header(HEADER_LIMIT), Some("2"));
        assert_eq!(reply.header(HEADER_OFFSET), Some("1"));

        let body = body(&reply);
        assert_eq!(body["success"], true);
        // d2 ranks first on its tag match, d1 then d3 follow by date
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["id"], "d1");
        assert_eq!(body["data"][1]["id"], "d3");
    }

    #[tokio::test]
    async fn test_invalid_query_is_400() {
        let engine = engine().await;
        let reply = handle_search(&engine, &Method::Get, &RawParams::query("v")).await;

        assert_eq!(reply.status, 400);
        assert_eq!(body(&reply)["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_preflight_and_other_methods() {
        let engine = engine().await;

        let reply = handle_autocomplete(&engine, &"options".parse().unwrap(), &RawParams::default()).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, None);

        let reply = handle_search(&engine, &"POST".parse().unwrap(), &RawParams::query("vergi")).await;
        assert_eq!(reply.status, 405);
    }

    #[tokio::test]
    async fn test_autocomplete_reply() {
        let engine = engine().await;
        let reply = handle_autocomplete(&engine, &Method::Get, &RawParams::query("ver")).await;

        assert_eq!(reply.status, 200);
        let body = body(&reply);
        assert_eq!(body["data"]["suggestions"][0]["text"], "Vergi");
        assert_eq!(body["data"]["suggestions"][0]["type"], "title");
        assert_eq!(body["count"], 2);
    }
}
