//! Product types
//!
//! Raw records as they arrive from the API and the domain types derived
//! from them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Placeholder used for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Upper bound of the rating scale
const MAX_RATE: f64 = 5.0;

// ============================================================================
// Wire Records
// ============================================================================

/// A product as served by the API. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingRecord>,
}

impl ProductRecord {
    /// Create a record with only an id
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            price: None,
            description: None,
            category: None,
            image: None,
            rating: None,
        }
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the price
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Rating sub-object as served by the API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Decode a response body into product records
///
/// The body must be a JSON array. Any record that fails to decode fails the
/// whole response; partial arrays are never returned.
pub fn decode_products(body: &[u8]) -> Result<Vec<ProductRecord>> {
    serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("Failed to decode product list: {e}")))
}

// ============================================================================
// Domain Types
// ============================================================================

/// Average rating and number of reviews
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rating {
    /// Average rating in [0, 5]
    pub rate: f64,
    /// Number of reviews
    pub count: u64,
}

impl Rating {
    /// Build a rating from its wire form. Both fields must be present.
    pub fn from_record(record: RatingRecord) -> Option<Self> {
        let (rate, count) = (record.rate?, record.count?);
        let rate = if rate.is_finite() {
            rate.clamp(0.0, MAX_RATE)
        } else {
            0.0
        };
        Some(Self {
            rate,
            count: count.max(0) as u64,
        })
    }
}

/// A catalog product
///
/// Fields are private so a product cannot change after it has been built
/// from a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: i64,
    title: String,
    price: f64,
    description: String,
    category: String,
    image_url: Option<String>,
    rating: Option<Rating>,
}

impl Product {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Price, never negative
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let price = match record.price {
            Some(price) if price.is_finite() && price >= 0.0 => price,
            _ => 0.0,
        };

        Self {
            id: record.id,
            title: text_or_default(record.title),
            price,
            description: text_or_default(record.description),
            category: text_or_default(record.category),
            image_url: record.image.filter(|url| !url.trim().is_empty()),
            rating: record.rating.and_then(Rating::from_record),
        }
    }
}

fn text_or_default(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
