//! Catalog module
//!
//! The product list view-model: drives `PaginationState` with a
//! `ProductsApi`, reports progress to a `ProductListDelegate` and retries
//! through a `ConnectivityObserver` when the network comes back.

mod types;
mod view_model;

pub use types::{ProductListDelegate, ProductsApi};
pub use view_model::ProductListViewModel;
