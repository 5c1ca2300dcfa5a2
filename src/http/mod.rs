//! HTTP client module
//!
//! Provides the catalog API client, endpoint descriptions and the
//! request/response network logger.
//!
//! # Features
//!
//! - **Deterministic requests**: scheme and host from config, endpoint path and query
//! - **Standard headers**: JSON accept/content type and bearer authorization
//! - **Failure classification**: timeout, connection, server status, decode
//! - **Network logging**: one structured debug record per exchange

mod client;
mod endpoint;
mod logger;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use endpoint::{Endpoint, ProductsEndpoint};
pub use logger::{format_byte_count, pretty_json, NetworkLogger, RequestLog, ResponseLog};
