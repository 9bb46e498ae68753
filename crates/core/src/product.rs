//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// A purchasable product.
///
/// Products are defined once in the static catalog and never change at
/// runtime; the cart and the session hold clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Promotional badge such as "Best Seller".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl Product {
    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
