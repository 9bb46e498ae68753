//! `rk-cli catalog` - print the product grid as text.

use rapidkeys_core::{CatalogQuery, CategoryFilter, Product, SortOrder};
use rapidkeys_storefront::catalog;

use super::CommandError;

/// Print the products matching the given filters.
///
/// # Errors
///
/// Returns `CommandError::Category` if `category` names no category.
#[allow(clippy::print_stdout)]
pub fn list(search: &str, category: &str, sort: &str) -> Result<(), CommandError> {
    let query = CatalogQuery {
        search: search.to_string(),
        category: CategoryFilter::parse(category)?,
        sort: SortOrder::parse(sort),
    };
    let products = catalog::products();

    for line in render(&products, &query) {
        println!("{line}");
    }
    Ok(())
}

/// One line per matching product, or a single notice when nothing matches.
fn render(products: &[Product], query: &CatalogQuery) -> Vec<String> {
    let matches = query.apply(products);
    if matches.is_empty() {
        return vec!["No products found.".to_string()];
    }

    matches
        .into_iter()
        .map(|product| {
            let badge = product
                .badge
                .as_deref()
                .map(|b| format!("  [{b}]"))
                .unwrap_or_default();
            format!(
                "{:>3}  {:<32} {:<12} {:>12}{badge}",
                product.id.as_str(),
                product.name,
                product.category.label(),
                product.price.to_string(),
            )
        })
        .collect()
}
