//! Catalog seams
//!
//! Traits the view-model depends on: the products source and the UI
//! delegate it reports to.

use crate::error::Result;
use crate::product::ProductRecord;
use async_trait::async_trait;

/// Source of product records
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// Fetch up to `limit` products
    async fn fetch_products(&self, limit: u32) -> Result<Vec<ProductRecord>>;
}

/// Receives progress notifications from the view-model
///
/// The view-model only holds a weak reference, so a delegate that has been
/// dropped simply stops receiving calls.
pub trait ProductListDelegate: Send + Sync {
    /// The product list changed
    fn on_products_updated(&self) {}

    /// A follow-up page started loading
    fn on_loading_started(&self) {}

    /// A follow-up page finished loading, successfully or not
    fn on_loading_stopped(&self) {}

    /// A fetch failed; `message` is suitable for display
    fn on_load_failed(&self, _message: &str) {}
}
