//! Subcommand implementations.

pub mod catalog;
pub mod chat;
pub mod reviews;

use rapidkeys_core::CategoryError;
use rapidkeys_storefront::config::ConfigError;
use rapidkeys_storefront::services::ReviewStoreError;
use rapidkeys_storefront::store::StoreError;
use thiserror::Error;

/// Errors surfaced by any subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Category(#[from] CategoryError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("review store error: {0}")]
    Reviews(#[from] ReviewStoreError),

    #[error("unknown product: {0}")]
    UnknownProduct(String),
}
