//! Rapidkeys Core - Domain types and pure storefront logic.
//!
//! This crate provides the types shared by every Rapidkeys component:
//! - `storefront` - Server-rendered shop (catalog, cart, reviews, AI chat)
//! - `cli` - Command-line tools for inspecting the catalog and review store
//!
//! # Architecture
//!
//! The core crate contains only types and transforms - no I/O, no HTTP
//! clients, no storage. Everything here is synchronous and deterministic
//! (apart from the clock read when stamping a new review).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and product categories
//! - [`product`] - Catalog products
//! - [`catalog`] - Search, category filter and sort over a product list
//! - [`cart`] - Cart lines and quantity transitions
//! - [`review`] - Product reviews and submission validation
//! - [`chat`] - Chat transcript and its idle/awaiting state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod product;
pub mod review;
pub mod types;

pub use cart::{Cart, CartItem};
pub use catalog::{CatalogQuery, SortOrder};
pub use chat::{ChatError, ChatMessage, ChatRole, ChatState, Conversation};
pub use product::Product;
pub use review::{Review, ReviewDraft, ReviewError, ReviewSummary};
pub use types::*;
