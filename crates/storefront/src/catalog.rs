//! The Rapidkeys product catalog.
//!
//! Products are fixed at build time and never change while the server runs.

use rapidkeys_core::{Category, CategoryFilter, Price, Product, ProductId};

/// Currency shown next to every price.
pub const CURRENCY: &str = "LKR";

/// Filter buttons above the product grid, in display order.
pub const CATEGORY_BUTTONS: [CategoryFilter; 5] = [
    CategoryFilter::All,
    CategoryFilter::Only(Category::Keyboard),
    CategoryFilter::Only(Category::Mouse),
    CategoryFilter::Only(Category::Headset),
    CategoryFilter::Only(Category::Accessories),
];

/// Navigation bar links: label and the category they select.
pub const NAV_LINKS: [(&str, CategoryFilter); 5] = [
    ("Home", CategoryFilter::All),
    ("Keyboards", CategoryFilter::Only(Category::Keyboard)),
    ("Mice", CategoryFilter::Only(Category::Mouse)),
    ("Audio", CategoryFilter::Only(Category::Headset)),
    ("Accessories", CategoryFilter::Only(Category::Accessories)),
];

struct Entry {
    id: &'static str,
    name: &'static str,
    price: i64,
    category: Category,
    description: &'static str,
    badge: Option<&'static str>,
}

const ENTRIES: [Entry; 8] = [
    Entry {
        id: "1",
        name: "NeonStrike Mechanical Keyboard",
        price: 8500,
        category: Category::Keyboard,
        description: "RGB Blue switch mechanical keyboard perfect for coding and gaming.",
        badge: Some("Best Seller"),
    },
    Entry {
        id: "2",
        name: "Viper Wireless Mouse",
        price: 3200,
        category: Category::Mouse,
        description: "Ultra-lightweight wireless mouse with 16000 DPI sensor.",
        badge: Some("New"),
    },
    Entry {
        id: "3",
        name: "BassPro Gaming Headset",
        price: 12000,
        category: Category::Headset,
        description: "7.1 Surround sound with noise-cancelling microphone.",
        badge: None,
    },
    Entry {
        id: "4",
        name: "Student Laptop Stand",
        price: 2500,
        category: Category::Accessories,
        description: "Ergonomic aluminum stand for long study sessions.",
        badge: None,
    },
    Entry {
        id: "5",
        name: "ProStream Webcam 1080p",
        price: 6800,
        category: Category::Accessories,
        description: "Crystal clear video for Zoom classes and streaming.",
        badge: None,
    },
    Entry {
        id: "6",
        name: "SilentType Membrane Keyboard",
        price: 4500,
        category: Category::Keyboard,
        description: "Quiet keys, perfect for library use or late-night assignments.",
        badge: None,
    },
    Entry {
        id: "7",
        name: "RGB Desk Mat XL",
        price: 1800,
        category: Category::Accessories,
        description: "Water-resistant extended mousepad with glowing edges.",
        badge: None,
    },
    Entry {
        id: "8",
        name: "SonicBuds True Wireless",
        price: 5500,
        category: Category::Headset,
        description: "Budget-friendly earbuds with massive bass.",
        badge: Some("Student Pick"),
    },
];

/// Build the catalog in display ("Most Popular") order.
#[must_use]
pub fn products() -> Vec<Product> {
    ENTRIES
        .iter()
        .map(|entry| Product {
            id: ProductId::new(entry.id),
            name: entry.name.to_string(),
            price: Price::lkr(entry.price),
            category: entry.category,
            description: entry.description.to_string(),
            image: format!("https://picsum.photos/400/300?random={}", entry.id),
            badge: entry.badge.map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let products = products();
        assert_eq!(products.len(), 8);
        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_prices_in_lkr() {
        for product in products() {
            assert_eq!(product.price.currency_code.code(), CURRENCY);
        }
    }

    #[test]
    fn test_no_laptops_listed() {
        assert!(products().iter().all(|p| p.category != Category::Laptop));
        assert!(!CATEGORY_BUTTONS.contains(&CategoryFilter::Only(Category::Laptop)));
    }
}
