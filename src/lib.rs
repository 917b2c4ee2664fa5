//! Tool Directory Library
//!
//! A Notion-backed directory of third-party tools: an HTTP proxy that runs
//! one fixed database query, and the pipeline that turns the result into
//! filtered, sorted, rendered tool cards.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notion;
pub mod observability;

pub use config::schema::DirectoryConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
