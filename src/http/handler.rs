//! The directory query handler.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::{method_not_allowed, preflight, relay};
use crate::http::server::AppState;
use crate::notion::{DatabaseQuery, QueryError, QueryResponse};
use crate::observability::metrics;

/// Answer one inbound request at the query path.
///
/// `OPTIONS` and unsupported methods are answered locally. `GET` and `POST`
/// result in exactly one Notion call, unless configuration is missing or
/// the `POST` body is unusable.
pub async fn query_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    if method == Method::OPTIONS {
        return preflight();
    }

    if method != Method::GET && method != Method::POST {
        tracing::debug!(request_id = %request_id, method = %method, "Method not allowed");
        metrics::record_query("method_not_allowed", 405, start);
        return method_not_allowed();
    }

    tracing::debug!(request_id = %request_id, method = %method, "Fetching directory");

    match fetch(&state, &method, &body).await {
        Ok(response) => {
            metrics::record_query("ok", 200, start);
            relay(response, state.cache_max_age_secs)
        }
        Err(err) => {
            tracing::warn!(request_id = %request_id, kind = err.kind(), "Directory query failed");
            let response = err.into_response();
            metrics::record_query("error", response.status().as_u16(), start);
            response
        }
    }
}

async fn fetch(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> Result<QueryResponse, QueryError> {
    let mut query = DatabaseQuery::active_by_rating();
    if *method == Method::POST {
        query = query.merge(DatabaseQuery::overrides_from_body(body)?);
    }
    state.notion.query(&query).await
}
