//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::DirectoryConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "DIRECTORY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DirectoryConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DirectoryConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the process configuration.
///
/// Reads the file named by `DIRECTORY_CONFIG` when set (defaults otherwise),
/// then layers environment overrides on top and validates the result.
pub fn load_from_env() -> Result<DirectoryConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => load_config(Path::new(&path))?,
        _ => DirectoryConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `NOTION_API_KEY`, `NOTION_DATABASE_ID`, `NOTION_API_BASE_URL` and
/// `BIND_ADDRESS` from `lookup`. Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut DirectoryConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("NOTION_API_KEY") {
        config.notion.api_key = Some(key);
    }
    if let Some(id) = get("NOTION_DATABASE_ID") {
        config.notion.database_id = Some(id);
    }
    if let Some(url) = get("NOTION_API_BASE_URL") {
        config.notion.api_base_url = url;
    }
    if let Some(addr) = get("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("NOTION_API_KEY", "secret_123"),
            ("NOTION_DATABASE_ID", "db-abc"),
            ("BIND_ADDRESS", "127.0.0.1:9999"),
            ("NOTION_API_BASE_URL", "   "),
        ]
        .into_iter()
        .collect();

        let mut config = DirectoryConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.notion.api_key.as_deref(), Some("secret_123"));
        assert_eq!(config.notion.database_id.as_deref(), Some("db-abc"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        // Blank override leaves the default in place.
        assert_eq!(config.notion.api_base_url, "https://api.notion.com");
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!(
            "tool-directory-config-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [notion]
            api_key = "secret_file"
            database_id = "db-file"
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.notion.database_id.as_deref(), Some("db-file"));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!(
            "tool-directory-invalid-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[timeouts]\nrequest_secs = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("request_secs"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
