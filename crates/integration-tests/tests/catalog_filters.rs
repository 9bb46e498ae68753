//! Search, category filter and sort over the shipped catalog.

use rapidkeys_core::{CatalogQuery, Category, CategoryFilter, SortOrder};
use rapidkeys_storefront::catalog;

fn query(search: &str, category: &str, sort: &str) -> CatalogQuery {
    CatalogQuery {
        search: search.to_string(),
        category: CategoryFilter::parse(category).expect("category"),
        sort: SortOrder::parse(sort),
    }
}

#[test]
fn test_catalog_has_eight_products() {
    let products = catalog::products();
    assert_eq!(query("", "All", "popularity").apply(&products).len(), 8);
}

#[test]
fn test_headset_filter_yields_two() {
    let products = catalog::products();
    let names: Vec<&str> = query("", "Headset", "popularity")
        .apply(&products)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["BassPro Gaming Headset", "SonicBuds True Wireless"]);
}

#[test]
fn test_keyboard_filter_is_exact_subset() {
    let products = catalog::products();
    let expected: Vec<_> = products
        .iter()
        .filter(|p| p.category.to_string().eq_ignore_ascii_case("keyboard"))
        .collect();

    for spelling in ["Keyboard", "keyboard", "KEYBOARD"] {
        let result = query("", spelling, "popularity").apply(&products);
        assert_eq!(result, expected, "filter spelled {spelling}");
        assert!(result.iter().all(|p| p.category == Category::Keyboard));
    }
}

#[test]
fn test_price_low_is_non_decreasing() {
    let products = catalog::products();
    let sorted = query("", "All", "price-low").apply(&products);
    assert_eq!(sorted.len(), products.len());
    assert!(sorted.windows(2).all(|w| w[0].price.amount <= w[1].price.amount));
}

#[test]
fn test_price_high_is_non_increasing() {
    let products = catalog::products();
    let sorted = query("", "All", "price-high").apply(&products);
    assert!(sorted.windows(2).all(|w| w[0].price.amount >= w[1].price.amount));
}

#[test]
fn test_search_matches_description_case_insensitively() {
    let products = catalog::products();
    let result = query("ZOOM", "All", "popularity").apply(&products);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "ProStream Webcam 1080p");
}

#[test]
fn test_search_keeps_surrounding_spaces() {
    let products = catalog::products();
    let ids: Vec<&str> = query("keyboard ", "All", "popularity")
        .apply(&products)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["1"]);
}

#[test]
fn test_search_and_category_combine() {
    let products = catalog::products();
    assert!(query("webcam", "Keyboard", "popularity").apply(&products).is_empty());
}

#[test]
fn test_unknown_category_is_rejected() {
    assert!(CategoryFilter::parse("Toaster").is_err());
}
