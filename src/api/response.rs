// file: src/api/response.rs
// description: response envelope and transport-neutral reply for the http layer

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use tracing::error;

pub const HEADER_TOTAL_COUNT: &str = "X-Total-Count";
pub const HEADER_LIMIT: &str = "X-Limit";
pub const HEADER_OFFSET: &str = "X-Offset";

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Body shape shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, count: usize) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            count: Some(count),
        }
    }

    pub fn failure(err: &SearchError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error_label(err).to_string()),
            message: Some(err.to_string()),
            count: None,
        }
    }
}

fn error_label(err: &SearchError) -> &'static str {
    match err {
        SearchError::InvalidInput(_) => "invalid_input",
        SearchError::NotFound(_) => "not_found",
        SearchError::Timeout { .. } => "timeout",
        SearchError::Upstream { .. } => "upstream_failure",
        _ => "internal_error",
    }
}

/// What a transport should send back: status, headers and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiReply {
    /// No body, CORS headers only. Used for preflight.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        }
    }

    pub fn json<T: Serialize>(status: u16, response: &ApiResponse<T>) -> Self {
        match serde_json::to_string(response) {
            Ok(body) => Self::empty(status)
                .with_header("Content-Type", "application/json")
                .with_body(body),
            Err(e) => {
                error!(error = %e, "failed to encode response");
                Self::empty(500)
                    .with_header("Content-Type", "application/json")
                    .with_body(r#"{"success":false,"error":"internal_error"}"#.to_string())
            }
        }
    }

    pub fn from_error(err: &SearchError) -> Self {
        Self::json(err.status_code(), &ApiResponse::<()>::failure(err))
    }

    pub fn with_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
