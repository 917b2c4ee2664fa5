//! Request identification.
//!
//! # Responsibilities
//! - Attach a unique `x-request-id` to every inbound request
//! - Echo the id back on the response for correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An id supplied by the caller is kept as-is

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer generating a UUID v4 request id when the caller sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Request id from `headers`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
