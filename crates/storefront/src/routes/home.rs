//! Home page and the product grid.
//!
//! The full page and the HTMX grid fragment share one query format:
//! `?q=<search>&category=<Keyboard|All|...>&sort=<popularity|price-low|price-high|name>`.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rapidkeys_core::{CatalogQuery, CategoryFilter, Product, SortOrder};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{CATEGORY_BUTTONS, NAV_LINKS};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session;
use crate::routes::cart::CartView;
use crate::routes::chat::ChatView;
use crate::state::AppState;

/// Catalog query string.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl CatalogParams {
    /// Convert to a catalog query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `category` names no category.
    pub fn to_query(&self) -> Result<CatalogQuery> {
        let category = CategoryFilter::parse(self.category.as_deref().unwrap_or_default())
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(CatalogQuery {
            search: self.q.clone().unwrap_or_default(),
            category,
            sort: SortOrder::parse(self.sort.as_deref().unwrap_or_default()),
        })
    }
}

/// Product card display data.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub badge: Option<String>,
    /// Grouped amount, e.g. `12,000`.
    pub price: String,
    pub currency: &'static str,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            badge: product.badge.clone(),
            price: product.price.grouped_amount(),
            currency: product.price.currency_code.code(),
        }
    }
}

/// A filter button or navigation link.
#[derive(Clone)]
pub struct CategoryLinkView {
    pub label: &'static str,
    /// Query value, e.g. `Keyboard`.
    pub value: &'static str,
    pub active: bool,
}

/// An option of the sort dropdown.
#[derive(Clone)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the product grid section renders.
#[derive(Clone)]
pub struct GridView {
    pub products: Vec<ProductCardView>,
    pub search: String,
    pub category: &'static str,
    pub categories: Vec<CategoryLinkView>,
    pub sorts: Vec<SortOptionView>,
}

impl GridView {
    #[must_use]
    pub fn build(products: &[Product], query: &CatalogQuery) -> Self {
        Self {
            products: query.apply(products).into_iter().map(ProductCardView::from).collect(),
            search: query.search.trim().to_string(),
            category: query.category.label(),
            categories: CATEGORY_BUTTONS
                .iter()
                .map(|filter| CategoryLinkView {
                    label: filter.label(),
                    value: filter.label(),
                    active: *filter == query.category,
                })
                .collect(),
            sorts: SortOrder::ALL
                .iter()
                .map(|sort| SortOptionView {
                    value: sort.as_str(),
                    label: sort.label(),
                    selected: *sort == query.sort,
                })
                .collect(),
        }
    }
}

/// Navigation links with the active category highlighted.
#[must_use]
pub fn nav_links(active: CategoryFilter) -> Vec<CategoryLinkView> {
    NAV_LINKS
        .iter()
        .map(|&(label, filter)| CategoryLinkView {
            label,
            value: filter.label(),
            active: filter == active,
        })
        .collect()
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nonce: String,
    pub nav: Vec<CategoryLinkView>,
    pub search: String,
    pub cart: CartView,
    pub chat: ChatView,
    pub grid: GridView,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub grid: GridView,
}

/// Display the home page.
#[instrument(skip(state, session, nonce))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    Query(params): Query<CatalogParams>,
) -> Result<HomeTemplate> {
    let query = params.to_query()?;
    let cart = session::load_cart(&session).await?;
    let conversation = session::reset_conversation(&session).await?;

    Ok(HomeTemplate {
        nonce,
        nav: nav_links(query.category),
        search: query.search.clone(),
        cart: CartView::from(&cart),
        chat: ChatView::from(&conversation),
        grid: GridView::build(state.products(), &query),
    })
}

/// Product grid fragment (HTMX).
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<ProductGridTemplate> {
    let query = params.to_query()?;
    Ok(ProductGridTemplate {
        grid: GridView::build(state.products(), &query),
    })
}
