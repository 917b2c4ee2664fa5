//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the query handler
//! - Wire up middleware (tracing, limits, request ID, CORS headers)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer, map_response_body::MapResponseBodyLayer,
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::DirectoryConfig;
use crate::http::handler::query_handler;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::cors_headers;
use crate::notion::{NotionClient, QueryResult};

/// Fixed path the page fetches the directory from.
pub const QUERY_PATH: &str = "/.netlify/functions/notion";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub notion: Arc<NotionClient>,
    pub cache_max_age_secs: u64,
}

impl AppState {
    pub fn from_config(config: &DirectoryConfig) -> QueryResult<Self> {
        Ok(Self {
            notion: Arc::new(NotionClient::new(config.notion.clone())?),
            cache_max_age_secs: config.cache.max_age_secs,
        })
    }
}

/// HTTP server for the directory proxy.
pub struct HttpServer {
    router: Router,
    config: DirectoryConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DirectoryConfig) -> QueryResult<Self> {
        let state = AppState::from_config(&config)?;
        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = QUERY_PATH,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &DirectoryConfig, state: AppState) -> Router {
    let [origin, headers, methods] = cors_headers();

    Router::new()
        .route(QUERY_PATH, any(query_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(SetResponseHeaderLayer::overriding(origin.0, origin.1))
                .layer(SetResponseHeaderLayer::overriding(headers.0, headers.1))
                .layer(SetResponseHeaderLayer::overriding(methods.0, methods.1))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes)),
        )
}
