//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use rapidkeys_core::review::MAX_RATING;
use rapidkeys_core::{CategoryFilter, Product, ProductId, Review, ReviewSummary};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session;
use crate::routes::cart::CartView;
use crate::routes::chat::ChatView;
use crate::routes::home::{CategoryLinkView, nav_links};
use crate::state::AppState;

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailsView {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub description: String,
    pub image: String,
    pub badge: Option<String>,
    pub price: String,
    pub currency: &'static str,
}

impl From<&Product> for ProductDetailsView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.as_str(),
            description: product.description.clone(),
            image: product.image.clone(),
            badge: product.badge.clone(),
            price: product.price.grouped_amount(),
            currency: product.price.currency_code.code(),
        }
    }
}

const STAR_FILLED: &str = "star star--filled";
const STAR_EMPTY: &str = "star";

/// One review as displayed.
#[derive(Clone)]
pub struct ReviewView {
    pub user_name: String,
    pub date: String,
    pub comment: String,
    /// CSS class per star position.
    pub stars: Vec<&'static str>,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        let filled = review.filled_stars();
        Self {
            user_name: review.user_name.clone(),
            date: review.date.clone(),
            comment: review.comment.clone(),
            stars: (1..=MAX_RATING)
                .map(|star| if star <= filled { STAR_FILLED } else { STAR_EMPTY })
                .collect(),
        }
    }
}

/// A product's reviews plus the rating summary.
#[derive(Clone)]
pub struct ReviewsView {
    pub product_id: String,
    pub items: Vec<ReviewView>,
    pub count: usize,
    /// One decimal, or `New`.
    pub average: String,
}

impl ReviewsView {
    #[must_use]
    pub fn new(product_id: &ProductId, reviews: &[Review]) -> Self {
        let summary = ReviewSummary::from_reviews(reviews);
        Self {
            product_id: product_id.to_string(),
            items: reviews.iter().map(ReviewView::from).collect(),
            count: summary.count,
            average: summary.display_average(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nonce: String,
    pub nav: Vec<CategoryLinkView>,
    pub search: String,
    pub cart: CartView,
    pub chat: ChatView,
    pub product: ProductDetailsView,
    pub reviews: ReviewsView,
}

/// Quick view modal fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductDetailsView,
    pub reviews: ReviewsView,
}

fn find_product<'a>(state: &'a AppState, id: &ProductId) -> Result<&'a Product> {
    state
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display the product detail page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::new(id);
    let product = find_product(&state, &id)?;
    let reviews = state.reviews().list(&id);
    let cart = session::load_cart(&session).await?;
    let conversation = session::reset_conversation(&session).await?;

    add_breadcrumb("navigation", "Viewed product", Some(&[("product_id", id.as_str())]));

    Ok(ProductShowTemplate {
        nonce,
        nav: nav_links(CategoryFilter::Only(product.category)),
        search: String::new(),
        cart: CartView::from(&cart),
        chat: ChatView::from(&conversation),
        product: ProductDetailsView::from(product),
        reviews: ReviewsView::new(&id, &reviews),
    })
}

/// Quick view modal fragment (HTMX).
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<QuickViewTemplate> {
    let id = ProductId::new(id);
    let product = find_product(&state, &id)?;
    let reviews = state.reviews().list(&id);

    Ok(QuickViewTemplate {
        product: ProductDetailsView::from(product),
        reviews: ReviewsView::new(&id, &reviews),
    })
}

#[cfg(test)]
mod tests {
    use rapidkeys_core::ReviewId;

    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::new("1718000000000"),
            product_id: ProductId::new("1"),
            user_name: "Kasun".to_string(),
            rating,
            comment: "Clicky and loud".to_string(),
            date: "6/10/2024".to_string(),
        }
    }

    #[test]
    fn test_review_stars() {
        assert_eq!(
            ReviewView::from(&review(3)).stars,
            vec![STAR_FILLED, STAR_FILLED, STAR_FILLED, STAR_EMPTY, STAR_EMPTY]
        );
        assert_eq!(ReviewView::from(&review(9)).stars, vec![STAR_FILLED; 5]);
    }

    #[test]
    fn test_reviews_view_summary() {
        let id = ProductId::new("1");
        let empty = ReviewsView::new(&id, &[]);
        assert_eq!(empty.average, "New");
        assert_eq!(empty.count, 0);

        let view = ReviewsView::new(&id, &[review(5), review(4)]);
        assert_eq!(view.average, "4.5");
        assert_eq!(view.count, 2);
        assert_eq!(view.product_id, "1");
    }
}
