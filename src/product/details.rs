//! Detail-screen presenter
//!
//! Turns a `Product` into the display strings a detail view shows.

use super::types::{Product, NOT_AVAILABLE};

/// Formatted view of a single product
#[derive(Debug, Clone)]
pub struct ProductDetails {
    product: Product,
}

impl ProductDetails {
    pub fn new(product: Product) -> Self {
        Self { product }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn title(&self) -> &str {
        self.product.title()
    }

    /// Price with a dollar sign and two decimals, e.g. "$109.95"
    pub fn price(&self) -> String {
        format!("${:.2}", self.product.price())
    }

    pub fn description(&self) -> &str {
        self.product.description()
    }

    /// Category with every word capitalized, e.g. "Men's Clothing"
    ///
    /// The missing-value placeholder is shown as is.
    pub fn category(&self) -> String {
        let category = self.product.category();
        if category == NOT_AVAILABLE {
            return category.to_string();
        }
        capitalize_words(category)
    }

    /// Average rating with one decimal, or "No rating"
    pub fn rating(&self) -> String {
        match self.product.rating() {
            Some(rating) => format!("{:.1}", rating.rate),
            None => "No rating".to_string(),
        }
    }

    /// Review count in parentheses, or empty when unrated
    pub fn rating_count(&self) -> String {
        match self.product.rating() {
            Some(rating) => format!("({} reviews)", rating.count),
            None => String::new(),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.product.image_url()
    }

    pub fn has_rating(&self) -> bool {
        self.product.rating().is_some()
    }
}

impl std::fmt::Display for ProductDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f, "  Price:    {}", self.price())?;
        writeln!(f, "  Category: {}", self.category())?;
        if self.has_rating() {
            writeln!(f, "  Rating:   {} {}", self.rating(), self.rating_count())?;
        } else {
            writeln!(f, "  Rating:   {}", self.rating())?;
        }
        if let Some(url) = self.image_url() {
            writeln!(f, "  Image:    {url}")?;
        }
        write!(f, "\n{}", self.description())
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
