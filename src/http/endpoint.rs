//! Endpoint descriptions
//!
//! An endpoint knows its path, method, query and body. The scheme and
//! host always come from the API configuration.

use crate::config::ApiConfig;
use crate::error::Result;
use crate::types::{JsonValue, Method};
use url::Url;

/// Description of a single API endpoint
pub trait Endpoint {
    /// Absolute path, starting with '/'
    fn path(&self) -> &str;

    /// HTTP method
    fn method(&self) -> Method {
        Method::GET
    }

    /// Query parameters, in order
    fn query_items(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// JSON request body
    fn body(&self) -> Option<JsonValue> {
        None
    }

    /// Full request URL for the given API configuration
    fn url(&self, api: &ApiConfig) -> Result<Url> {
        let mut url = Url::parse(&api.base_url())?;
        url.set_path(self.path());

        let query = self.query_items();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Endpoints of the products API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductsEndpoint {
    /// `GET /products?limit=<n>`
    List { limit: u32 },
}

impl Endpoint for ProductsEndpoint {
    fn path(&self) -> &str {
        match self {
            ProductsEndpoint::List { .. } => "/products",
        }
    }

    fn query_items(&self) -> Vec<(String, String)> {
        match self {
            ProductsEndpoint::List { limit } => vec![("limit".to_string(), limit.to_string())],
        }
    }
}
