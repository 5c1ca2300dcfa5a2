// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # catalog-pager
//!
//! Client-side pagination for a product catalog REST API that only
//! understands `GET /products?limit=<n>`.
//!
//! ## Features
//!
//! - **Growing-limit paging**: each page asks for `base * 2^page` products
//! - **De-duplication**: overlapping pages never produce duplicate products
//! - **End-of-data detection**: a short or all-duplicate page ends paging
//! - **Reconnect retry**: a failed load is retried once the network returns
//! - **Network logging**: structured `tracing` records for every request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_pager::{CatalogConfig, HttpClient, HttpClientConfig, ProductListViewModel};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> catalog_pager::Result<()> {
//!     let config = CatalogConfig::default();
//!     let client = HttpClient::with_config(HttpClientConfig::from_catalog(&config))?;
//!     let view_model = ProductListViewModel::new(Arc::new(client), 7);
//!
//!     if let Some(task) = view_model.load_initial_products() {
//!         task.await.ok();
//!     }
//!     while let Some(task) = view_model.load_more_products_if_possible() {
//!         task.await.ok();
//!     }
//!     println!("{} products", view_model.product_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: product list view-model and its delegate
//! - [`pagination`]: the synchronous pagination state machine
//! - [`connectivity`]: edge-triggered reachability observer
//! - [`http`]: HTTP client, endpoints and network logger
//! - [`product`]: product records, domain type and detail presenter
//! - [`config`]: YAML configuration
//! - [`error`]: error types

pub mod catalog;
pub mod cli;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod http;
pub mod pagination;
pub mod product;
pub mod types;

// Re-export commonly used types
pub use catalog::{ProductListDelegate, ProductListViewModel, ProductsApi};
pub use config::CatalogConfig;
pub use connectivity::{ConnectivityObserver, ReachabilityChannel, ReachabilitySource};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{LoadOutcome, PaginationState, Phase};
pub use product::{Product, ProductDetails};
