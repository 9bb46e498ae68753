//! Business logic services for the storefront.
//!
//! # Services
//!
//! - [`reviews`] - Per-product reviews kept in the local key-value store
//! - [`assistant`] - RapidBot shopping assistant backed by the Claude API

pub mod assistant;
pub mod reviews;

pub use assistant::ShoppingAssistant;
pub use reviews::{ReviewStore, ReviewStoreError};
