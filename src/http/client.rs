//! HTTP client for the catalog API
//!
//! Builds requests from `Endpoint` descriptions and handles:
//! - Standard JSON and bearer authorization headers
//! - Error classification (timeout, connection, server status, decode)
//! - Best-effort logging of every exchange

use super::endpoint::{Endpoint, ProductsEndpoint};
use super::logger::{NetworkLogger, RequestLog, ResponseLog};
use crate::catalog::ProductsApi;
use crate::config::{ApiConfig, CatalogConfig};
use crate::error::{Error, Result};
use crate::product::{decode_products, ProductRecord};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Scheme, host, token and timeout
    pub api: ApiConfig,
    /// Extra headers for all requests
    pub default_headers: Vec<(String, String)>,
    /// User agent string
    pub user_agent: String,
    /// Include response bodies in network logs
    pub log_bodies: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            default_headers: Vec::new(),
            user_agent: format!("catalog-pager/{}", env!("CARGO_PKG_VERSION")),
            log_bodies: true,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Build client config from the loaded catalog config
    pub fn from_catalog(config: &CatalogConfig) -> Self {
        Self {
            api: config.api.clone(),
            log_bodies: config.logging.log_bodies,
            ..Self::default()
        }
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set scheme and host from a base URL such as "http://127.0.0.1:8080"
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        let url = url.as_ref().trim_end_matches('/');
        match url.split_once("://") {
            Some((scheme, host)) => {
                self.config.api.scheme = scheme.to_string();
                self.config.api.host = host.to_string();
            }
            None => self.config.api.host = url.to_string(),
        }
        self
    }

    /// Set the host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.api.host = host.into();
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.api.token = token.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.api.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((key.into(), value.into()));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable or disable response bodies in network logs
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.config.log_bodies = enabled;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for the catalog API
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    logger: NetworkLogger,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.api.timeout())
            .user_agent(&config.user_agent)
            .build()?;
        let logger = NetworkLogger::new(config.log_bodies);

        Ok(Self {
            client,
            config,
            logger,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(&self, endpoint: &impl Endpoint) -> Result<T> {
        let body = self.request(endpoint).await?;
        serde_json::from_slice(&body).map_err(|e| Error::decode(format!("Invalid JSON body: {e}")))
    }

    /// Send a request and return the raw body of a 2xx response
    pub async fn request(&self, endpoint: &impl Endpoint) -> Result<Bytes> {
        let url = endpoint.url(&self.config.api)?;
        let method = endpoint.method();
        let json_body = endpoint.body();
        let headers = self.request_headers();
        let timeout_ms = self.config.api.timeout().as_millis() as u64;

        let log_request = RequestLog {
            method,
            url: &url,
            headers: &headers,
            body: json_body.as_ref(),
        };

        let mut req = self.client.request(method.into(), url.clone());
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(ref body) = json_body {
            req = req.json(body);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = Error::from_transport(e, timeout_ms);
                self.logger.log_exchange(
                    &log_request,
                    &ResponseLog::Failed {
                        error: &error.to_string(),
                    },
                );
                warn!("{} {} failed: {}", method, url, error);
                return Err(error);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let error = Error::from_transport(e, timeout_ms);
                self.logger.log_exchange(
                    &log_request,
                    &ResponseLog::Failed {
                        error: &error.to_string(),
                    },
                );
                warn!("{} {} body read failed: {}", method, url, error);
                return Err(error);
            }
        };

        self.logger.log_exchange(
            &log_request,
            &ResponseLog::Received {
                status: status.as_u16(),
                body: &body,
            },
        );

        if !status.is_success() {
            warn!("{} {} returned {}", method, url, status.as_u16());
            return Err(Error::server_status(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(body)
    }

    /// Headers sent with every request, in send order
    fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api.token),
            ),
        ];
        headers.extend(self.config.default_headers.iter().cloned());
        headers
    }
}

#[async_trait]
impl ProductsApi for HttpClient {
    async fn fetch_products(&self, limit: u32) -> Result<Vec<ProductRecord>> {
        let body = self.request(&ProductsEndpoint::List { limit }).await?;
        decode_products(&body)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.api.base_url())
            .field("timeout", &self.config.api.timeout())
            .field("has_token", &!self.config.api.token.is_empty())
            .finish_non_exhaustive()
    }
}
