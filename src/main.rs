//! Tool Directory proxy server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser                 ┌──────────────────────────────────────┐
//!   ───────────────────────▶│  http::server  (CORS, request id,   │
//!   GET/POST/OPTIONS        │                 timeout, body limit) │
//!                           │        │                             │
//!                           │        ▼                             │
//!                           │  http::handler ──▶ notion::client ───┼──▶ Notion API
//!                           │        │                             │
//!   ◀───────────────────────│  http::response (relay / JSON error) │
//!                           └──────────────────────────────────────┘
//!
//!   The page (or directory-cli) feeds the relayed body to `catalog`:
//!   parse → filter/sort → render.
//! ```

use tokio::net::TcpListener;

use tool_directory::config::load_from_env;
use tool_directory::http::HttpServer;
use tool_directory::lifecycle::{signals, Shutdown};
use tool_directory::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    logging::init_logging(&config.observability);

    tracing::info!("tool-directory v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        notion = ?config.notion,
        request_timeout_secs = config.timeouts.request_secs,
        cache_max_age_secs = config.cache.max_age_secs,
        "Configuration loaded"
    );

    if config.notion.credentials().is_none() {
        tracing::warn!("Notion credentials missing; queries will answer 500 until configured");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
