//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DirectoryConfig → Result<(), Vec<ValidationError>>
//! - Missing Notion credentials are NOT a validation error; the handler
//!   reports them per request

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::DirectoryConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': expected host:port")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid notion.api_base_url '{0}': expected an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("notion.notion_version must not be empty")]
    EmptyNotionVersion,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("unknown observability.log_level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &DirectoryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    match Url::parse(&config.notion.api_base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(
            config.notion.api_base_url.clone(),
        )),
    }

    if config.notion.notion_version.trim().is_empty() {
        errors.push(ValidationError::EmptyNotionVersion);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
