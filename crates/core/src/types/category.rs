//! Product categories and the category filter used by the catalog grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The value that selects every category.
pub const ALL_CATEGORIES: &str = "All";

/// Error returned when a string does not name a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keyboard,
    Mouse,
    Headset,
    Laptop,
    Accessories,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Keyboard,
        Self::Mouse,
        Self::Headset,
        Self::Laptop,
        Self::Accessories,
    ];

    /// Lowercase identifier as stored on products (`keyboard`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Mouse => "mouse",
            Self::Headset => "headset",
            Self::Laptop => "laptop",
            Self::Accessories => "accessories",
        }
    }

    /// Title-case label used on filter buttons (`Keyboard`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keyboard => "Keyboard",
            Self::Mouse => "Mouse",
            Self::Headset => "Headset",
            Self::Laptop => "Laptop",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}

/// Category selection for the product grid.
///
/// `All` is the universal match; anything else compares case-insensitively
/// against the product's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter value from a query string.
    ///
    /// Empty input and `All` (any case) select everything.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` if the value names no category.
    pub fn parse(value: &str) -> Result<Self, CategoryError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    /// Label as shown on the filter buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Keyboard".parse::<Category>(), Ok(Category::Keyboard));
        assert_eq!("HEADSET".parse::<Category>(), Ok(Category::Headset));
        assert_eq!(" mouse ".parse::<Category>(), Ok(Category::Mouse));
        assert!("toaster".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_sentinel() {
        assert_eq!(CategoryFilter::parse("All"), Ok(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("all"), Ok(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse(""), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("Accessories"),
            Ok(CategoryFilter::Only(Category::Accessories))
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Laptop));
        assert!(CategoryFilter::Only(Category::Mouse).matches(Category::Mouse));
        assert!(!CategoryFilter::Only(Category::Mouse).matches(Category::Keyboard));
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Accessories).expect("serialize");
        assert_eq!(json, "\"accessories\"");
    }
}
