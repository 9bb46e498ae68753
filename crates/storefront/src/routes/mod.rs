//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Home page (?q=&category=&sort=)
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (review store readable)
//!
//! # Products
//! GET  /products                    - Product grid fragment (HTMX)
//! GET  /products/{id}               - Product detail page
//! GET  /products/{id}/quick-view    - Quick view modal fragment (HTMX)
//! POST /products/{id}/reviews       - Post a review (returns reviews fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                        - Cart drawer
//! POST /cart/add                    - Add one unit, open drawer, toast
//! POST /cart/update                 - Change quantity by +1/-1
//! POST /cart/remove                 - Remove a line
//! POST /cart/open                   - Show drawer
//! POST /cart/close                  - Hide drawer
//! GET  /cart/count                  - Navbar badge
//!
//! # Chat (HTMX fragments)
//! GET  /chat                        - Transcript
//! POST /chat/messages               - Send a message
//! ```

pub mod cart;
pub mod chat;
pub mod health;
pub mod home;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::grid))
        .route("/{id}", get(products::show))
        .route("/{id}/quick-view", get(products::quick_view))
        .route("/{id}/reviews", post(reviews::submit))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create the chat routes router.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::show))
        .route("/messages", post(chat::send))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/chat", chat_routes())
}
