//! `rk-cli reviews` - inspect and reset the review record.

use std::path::Path;
use std::sync::Arc;

use rapidkeys_core::{ProductId, Review, ReviewSummary};
use rapidkeys_storefront::catalog;
use rapidkeys_storefront::config::StorefrontConfig;
use rapidkeys_storefront::services::ReviewStore;
use rapidkeys_storefront::store::FileStore;

use super::CommandError;

/// Open the review store in the configured data directory.
fn open_store() -> Result<ReviewStore, CommandError> {
    let config = StorefrontConfig::from_env()?;
    store_at(&config.data_dir)
}

fn store_at(dir: &Path) -> Result<ReviewStore, CommandError> {
    let kv = FileStore::open(dir)?;
    tracing::debug!(dir = %kv.dir().display(), "Opened review store");
    Ok(ReviewStore::new(Arc::new(kv)))
}

/// Print a product's reviews, newest first.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the data directory cannot
/// be opened, or the product is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn list(product_id: &str) -> Result<(), CommandError> {
    let id = ProductId::new(product_id);
    let product = catalog::products()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CommandError::UnknownProduct(product_id.to_string()))?;

    let reviews = open_store()?.list(&id);
    println!("{}", product.name);
    for line in render(&reviews) {
        println!("{line}");
    }
    Ok(())
}

/// Delete every stored review.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the record cannot be
/// removed.
pub fn clear() -> Result<(), CommandError> {
    open_store()?.clear()?;
    tracing::info!("All reviews cleared");
    Ok(())
}

fn render(reviews: &[Review]) -> Vec<String> {
    if reviews.is_empty() {
        return vec!["No reviews yet.".to_string()];
    }

    let summary = ReviewSummary::from_reviews(reviews);
    let mut lines = vec![format!(
        "{} review(s), average {}",
        summary.count,
        summary.display_average()
    )];
    lines.extend(reviews.iter().map(|review| {
        format!(
            "  {} {:<20} {:>10}  {}",
            stars(review.filled_stars()),
            review.user_name,
            review.date,
            review.comment
        )
    }));
    lines
}

fn stars(filled: u8) -> String {
    (1..=rapidkeys_core::review::MAX_RATING)
        .map(|star| if star <= filled { '*' } else { '.' })
        .collect()
}
