//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation answers with the
//! re-rendered drawer and fires `cart-updated` so the navbar badge refreshes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use rapidkeys_core::{Cart, CartItem, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::htmx::{CART_UPDATED, HxTrigger, ToastLevel};
use crate::models::session;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    /// Unit price with currency, e.g. `8,500 LKR`.
    pub price: String,
    pub quantity: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.to_string(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            price: item.product.price.to_string(),
            quantity: item.quantity,
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Subtotal with currency, e.g. `24,000 LKR`.
    pub subtotal: String,
    pub count: u32,
    pub open: bool,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().to_string(),
            count: cart.total_quantity(),
            open: cart.is_open(),
        }
    }
}

/// Form naming one product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

/// Quantity change form; `delta` is `1` or `-1` from the drawer buttons.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub delta: i32,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn drawer(cart: &Cart) -> CartDrawerTemplate {
    CartDrawerTemplate {
        cart: CartView::from(cart),
    }
}

/// Cart drawer fragment.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartDrawerTemplate> {
    let cart = session::load_cart(&session).await?;
    Ok(drawer(&cart))
}

/// Add one unit of a product and open the drawer.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<(HxTrigger, CartDrawerTemplate)> {
    let product = state
        .product(&ProductId::new(form.product_id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = session::load_cart(&session).await?;
    cart.add(product);
    session::save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", form.product_id.as_str())]));
    tracing::info!(product_id = %product.id, quantity = cart.total_quantity(), "Added to cart");

    let trigger = HxTrigger::new().event(CART_UPDATED).toast(
        &format!("{} added to cart!", product.name),
        ToastLevel::Success,
    );
    Ok((trigger, drawer(&cart)))
}

/// Change a line's quantity by `delta`. Changes that would drop the quantity
/// below one are ignored.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<(HxTrigger, CartDrawerTemplate)> {
    let mut cart = session::load_cart(&session).await?;
    if cart.update_quantity(&ProductId::new(form.product_id), form.delta) {
        session::save_cart(&session, &cart).await?;
    }
    Ok((HxTrigger::new().event(CART_UPDATED), drawer(&cart)))
}

/// Remove a line regardless of quantity.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<(HxTrigger, CartDrawerTemplate)> {
    let mut cart = session::load_cart(&session).await?;
    if cart.remove(&ProductId::new(form.product_id)) {
        session::save_cart(&session, &cart).await?;
    }
    Ok((HxTrigger::new().event(CART_UPDATED), drawer(&cart)))
}

/// Show the drawer.
#[instrument(skip(session))]
pub async fn open(session: Session) -> Result<CartDrawerTemplate> {
    let mut cart = session::load_cart(&session).await?;
    cart.open();
    session::save_cart(&session, &cart).await?;
    Ok(drawer(&cart))
}

/// Hide the drawer.
#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<CartDrawerTemplate> {
    let mut cart = session::load_cart(&session).await?;
    cart.close();
    session::save_cart(&session, &cart).await?;
    Ok(drawer(&cart))
}

/// Cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = session::load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_quantity(),
    })
}

#[cfg(test)]
mod tests {
    use rapidkeys_core::Cart;

    use super::*;
    use crate::catalog;

    #[test]
    fn test_cart_view_totals() {
        let products = catalog::products();
        let headset = products
            .iter()
            .find(|p| p.price.plain_amount() == "12000")
            .expect("headset");

        let mut cart = Cart::new();
        cart.add(headset);
        cart.add(headset);

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "12,000 LKR");
        assert_eq!(view.subtotal, "24,000 LKR");
        assert_eq!(view.count, 2);
        assert!(view.open);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.count, 0);
        assert!(!view.open);
    }
}
