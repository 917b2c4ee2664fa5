//! Notion integration subsystem.
//!
//! # Data Flow
//! ```text
//! inbound body (optional overrides)
//!     → query.rs (fixed filter/sort + caller keys)
//!     → client.rs (one POST to databases/{id}/query)
//!     → QueryResponse (verbatim bytes) or QueryError
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per invocation; no retry, no backoff
//! - Credentials checked before any network activity
//! - Success bodies are relayed as bytes, never re-serialized

pub mod client;
pub mod query;
pub mod types;

pub use client::NotionClient;
pub use query::DatabaseQuery;
pub use types::{QueryError, QueryResponse, QueryResult};
