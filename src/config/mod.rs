//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → DirectoryConfig (validated, immutable)
//!     → shared with the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::DirectoryConfig;
pub use schema::ListenerConfig;
pub use schema::NotionConfig;
pub use schema::ObservabilityConfig;
