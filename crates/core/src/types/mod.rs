//! Core types for Rapidkeys.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;

pub use category::{Category, CategoryError, CategoryFilter};
pub use id::*;
pub use price::{CurrencyCode, Price};
