//! Notion query types and error definitions.

use axum::body::Bytes;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while answering a directory query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Credential or database id missing from process configuration.
    #[error("Configuration error: {0}")]
    Configuration(&'static str),

    /// The caller's request body is not a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Notion answered with a non-success status.
    #[error("Notion returned {status}")]
    Upstream { status: StatusCode, payload: Value },

    /// Network failure or unreadable response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Notion answered 2xx with a body that is not JSON.
    #[error("malformed Notion response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl QueryError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Configuration(_) => "configuration",
            QueryError::InvalidRequest(_) => "invalid_request",
            QueryError::Upstream { .. } => "upstream",
            QueryError::Transport(_) | QueryError::MalformedResponse(_) => "transport",
        }
    }
}

/// Result type for Notion queries.
pub type QueryResult<T> = Result<T, QueryError>;

/// A successful query response, relayed to the caller without modification.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    /// Raw upstream body, kept opaque so it is never re-serialized.
    pub body: Bytes,
}
