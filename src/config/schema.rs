//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the directory
//! proxy. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the tool directory proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Notion credentials and endpoint.
    pub notion: NotionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cache directive sent with successful responses.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,

    /// Largest inbound request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Notion API settings.
///
/// The credential and database id are optional here: their absence is
/// reported per request as a configuration error, not at startup.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token sent as a bearer credential.
    pub api_key: Option<String>,

    /// Database whose rows make up the directory.
    pub database_id: Option<String>,

    /// Base URL of the Notion REST API.
    pub api_base_url: String,

    /// Value of the `Notion-Version` header.
    pub notion_version: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: None,
            api_base_url: "https://api.notion.com".to_string(),
            notion_version: "2022-06-28".to_string(),
            use_system_proxy: true,
        }
    }
}

impl NotionConfig {
    /// Credential and database id, when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let api_key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        let database_id = self.database_id.as_deref().filter(|d| !d.is_empty())?;
        Some((api_key, database_id))
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("api_base_url", &self.api_base_url)
            .field("notion_version", &self.notion_version)
            .field("use_system_proxy", &self.use_system_proxy)
            .finish()
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request budget in seconds, mirroring the hosting platform's
    /// function invocation limit.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Response caching directive.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `max-age` advertised on successful query responses.
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_age_secs: 300 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
