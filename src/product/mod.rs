//! Product module
//!
//! Wire records as served by the catalog API, the immutable domain
//! `Product` built from them, and a detail-screen presenter.
//!
//! # Overview
//!
//! The upstream schema allows almost every field to be missing or null.
//! Decoding is strict about the overall shape (the body must be a JSON array
//! of objects carrying an `id`) and lenient about everything else, which is
//! replaced with defaults when the domain `Product` is built.

mod details;
mod types;

pub use details::ProductDetails;
pub use types::{decode_products, Product, ProductRecord, Rating, RatingRecord, NOT_AVAILABLE};
