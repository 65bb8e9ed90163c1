// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream failure during {operation}: {message}")]
    Upstream { operation: String, message: String },

    #[error("{operation} timed out after {}s", .after.as_secs_f64())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SearchError {
    pub fn upstream(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Upstream {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// HTTP-style status code for the API layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Timeout { .. } => 504,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SearchError::InvalidInput("q".into()).status_code(), 400);
        assert_eq!(SearchError::NotFound("doc".into()).status_code(), 404);
        assert_eq!(
            SearchError::Timeout {
                operation: "search",
                after: Duration::from_secs(30)
            }
            .status_code(),
            504
        );
        assert_eq!(SearchError::upstream("scan", "down").status_code(), 500);
    }

    #[test]
    fn test_upstream_message_carries_cause() {
        let err = SearchError::upstream("metadata scan", "connection refused");
        assert_eq!(
            err.to_string(),
            "Upstream failure during metadata scan: connection refused"
        );
    }
}
