//! Response construction.
//!
//! # Responsibilities
//! - Relay Notion's body verbatim with a cache directive
//! - Map query errors to structured JSON bodies and status codes
//! - Provide the cross-origin headers applied to every response
//!
//! # Design Decisions
//! - Errors never escape the handler; each becomes `{error, message|details}`
//! - CORS headers are set by a router layer so no path can miss them

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::notion::{QueryError, QueryResponse};

/// Label attached to every Notion failure.
pub const FETCH_FAILED: &str = "Failed to fetch data from Notion";

/// Cross-origin headers carried by every response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ),
    ]
}

/// Successful relay of the upstream body.
pub fn relay(response: QueryResponse, max_age_secs: u64) -> Response {
    let cache = HeaderValue::from_str(&format!("public, max-age={}", max_age_secs))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CACHE_CONTROL, cache),
        ],
        Body::from(response.body),
    )
        .into_response()
}

/// Empty pre-flight answer.
pub fn preflight() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::empty(),
    )
        .into_response()
}

pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        match self {
            QueryError::Configuration(message) => {
                tracing::error!(error = %message, "Notion configuration missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Configuration error", "message": message })),
                )
                    .into_response()
            }
            QueryError::InvalidRequest(message) => {
                tracing::warn!(error = %message, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid request body", "message": message })),
                )
                    .into_response()
            }
            QueryError::Upstream { status, payload } => {
                tracing::error!(status = %status, details = %payload, "Notion returned an error");
                (
                    status,
                    Json(json!({ "error": FETCH_FAILED, "details": payload })),
                )
                    .into_response()
            }
            err @ (QueryError::Transport(_) | QueryError::MalformedResponse(_)) => {
                tracing::error!(error = %err, "Error fetching from Notion");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": FETCH_FAILED, "message": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
