//! Configuration types for the catalog client
//!
//! This module contains the configuration structures loaded from YAML.
//! Every field has a default, so an empty document is a valid config.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationSettings,

    /// Network logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string and validate it
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce valid requests
    pub fn validate(&self) -> Result<()> {
        if self.api.host.trim().is_empty() {
            return Err(Error::missing_field("api.host"));
        }
        if self.api.host.contains('/') {
            return Err(Error::invalid_value(
                "api.host",
                "expected a bare host name without scheme or path",
            ));
        }
        if !matches!(self.api.scheme.as_str(), "http" | "https") {
            return Err(Error::invalid_value(
                "api.scheme",
                format!("unsupported scheme '{}'", self.api.scheme),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::invalid_value("api.timeout_secs", "must be positive"));
        }
        if self.pagination.base_page_size == 0 {
            return Err(Error::invalid_value(
                "pagination.base_page_size",
                "must be positive",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL scheme ("https" or "http")
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Host name, optionally with a port (e.g. "fakestoreapi.com")
    #[serde(default = "default_host")]
    pub host: String,

    /// Bearer token sent with every request (may be empty)
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            token: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Scheme and host joined into a base URL
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "fakestoreapi.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Limit used for the first page; doubled for each following page
    #[serde(default = "default_base_page_size")]
    pub base_page_size: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            base_page_size: default_base_page_size(),
        }
    }
}

fn default_base_page_size() -> u32 {
    7
}

// ============================================================================
// Logging Config
// ============================================================================

/// Network logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Include pretty-printed response bodies in network logs
    #[serde(default = "default_true")]
    pub log_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_bodies: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.api.scheme, "https");
        assert_eq!(config.api.host, "fakestoreapi.com");
        assert_eq!(config.api.token, "");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.pagination.base_page_size, 7);
        assert!(config.logging.log_bodies);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = CatalogConfig::from_yaml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
api:
  host: "shop.example.com"
  token: "secret"
pagination:
  base_page_size: 5
"#;

        let config = CatalogConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.api.host, "shop.example.com");
        assert_eq!(config.api.token, "secret");
        assert_eq!(config.api.scheme, "https");
        assert_eq!(config.pagination.base_page_size, 5);
        assert_eq!(config.api.base_url(), "https://shop.example.com");
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let yaml = "pagination:\n  base_page_size: 0\n";
        let err = CatalogConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "pagination.base_page_size"));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let yaml = "api:\n  scheme: ftp\n";
        let err = CatalogConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("api.scheme"));
    }

    #[test]
    fn test_validate_rejects_host_with_path() {
        let yaml = "api:\n  host: \"https://shop.example.com/api\"\n";
        assert!(CatalogConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let yaml = "api:\n  host: \"\"\n";
        let err = CatalogConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api:\n  host: \"localhost:8080\"\n  scheme: http").unwrap();

        let config = CatalogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_from_missing_file() {
        let err = CatalogConfig::from_file("/nonexistent/catalog.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
