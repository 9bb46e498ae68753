//! Search, category filter and sort over a product list.
//!
//! The grid shows the products that pass both the category filter and the
//! text search, in the selected order.

use std::cmp::Ordering;

use crate::product::Product;
use crate::types::CategoryFilter;

/// Product grid ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Catalog order ("Most Popular").
    #[default]
    Popularity,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Alphabetical by name.
    Name,
}

impl SortOrder {
    /// Every option, in the order the dropdown lists them.
    pub const ALL: [Self; 4] = [Self::Popularity, Self::PriceLow, Self::PriceHigh, Self::Name];

    /// Parse from a query string value. Unknown values fall back to
    /// `Popularity`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "name" => Self::Name,
            _ => Self::Popularity,
        }
    }

    /// Query string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        }
    }

    /// Dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Most Popular",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Name => "Name: A-Z",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popularity => Ordering::Equal,
            Self::PriceLow => a.price.amount.cmp(&b.price.amount),
            Self::PriceHigh => b.price.amount.cmp(&a.price.amount),
            Self::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// What the visitor asked the grid to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Select and order the matching products.
    ///
    /// Sorting is stable, so equal keys keep catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        // Raw substring match: surrounding spaces are part of the needle.
        let needle = self.search.to_lowercase();

        let mut matches: Vec<&Product> = products
            .iter()
            .filter(|product| self.category.matches(product.category))
            .filter(|product| product.matches_search(&needle))
            .collect();

        if self.sort != SortOrder::Popularity {
            matches.sort_by(|a, b| self.sort.compare(a, b));
        }
        matches
    }

    /// Whether a non-empty search term is active.
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }
}
