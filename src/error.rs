//! Error types for the catalog pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the catalog pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Server responded with HTTP {status}")]
    ServerStatus { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Catalog Errors
    // ============================================================================
    #[error("Product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("Load was cancelled before it finished")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a server status error
    pub fn server_status(status: u16, body: impl Into<String>) -> Self {
        Self::ServerStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Classify a transport error from reqwest
    pub fn from_transport(error: reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout_ms }
        } else if error.is_connect() {
            Self::Connection {
                message: error.to_string(),
            }
        } else if error.is_decode() {
            Self::Decode {
                message: error.to_string(),
            }
        } else {
            Self::Http(error)
        }
    }

    /// Whether this error came from a fetch (as opposed to local setup)
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Error::Timeout { .. }
                | Error::Connection { .. }
                | Error::ServerStatus { .. }
                | Error::Decode { .. }
                | Error::Http(_)
        )
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Error::Timeout { .. } => "The request timed out. Please try again.".to_string(),
            Error::Connection { .. } => {
                "No internet connection. Products will reload once you're back online."
                    .to_string()
            }
            Error::ServerStatus { status, .. } => {
                format!("The server could not load products (HTTP {status}).")
            }
            Error::Decode { .. } => "Received an unexpected response from the server.".to_string(),
            Error::Cancelled => "Loading was interrupted. Please try again.".to_string(),
            other => format!("Something went wrong: {other}"),
        }
    }
}

/// Result type alias for the catalog pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api.host");
        assert_eq!(err.to_string(), "Missing required config field: api.host");

        let err = Error::server_status(500, "boom");
        assert_eq!(err.to_string(), "Server responded with HTTP 500");
    }

    #[test]
    fn test_is_network_failure() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_network_failure());
        assert!(Error::connection("refused").is_network_failure());
        assert!(Error::server_status(404, "").is_network_failure());
        assert!(Error::decode("bad json").is_network_failure());

        assert!(!Error::config("test").is_network_failure());
        assert!(!Error::ProductNotFound { id: 3 }.is_network_failure());
    }

    #[test]
    fn test_user_message() {
        let message = Error::server_status(500, "").user_message();
        assert!(message.contains("HTTP 500"));

        let message = Error::connection("refused").user_message();
        assert!(message.contains("No internet connection"));
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
