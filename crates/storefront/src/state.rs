//! Application state shared across handlers.

use std::sync::Arc;

use rapidkeys_core::{Product, ProductId};

use crate::catalog;
use crate::config::StorefrontConfig;
use crate::services::{ReviewStore, ShoppingAssistant};
use crate::store::{FileStore, KeyValueStore, StoreError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything here is either immutable (config,
/// catalog, assistant) or synchronizes internally (review store).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: Vec<Product>,
    reviews: ReviewStore,
    assistant: ShoppingAssistant,
}

impl AppState {
    /// Create state from explicit parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        kv: Arc<dyn KeyValueStore>,
        assistant: ShoppingAssistant,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: catalog::products(),
                reviews: ReviewStore::new(kv),
                assistant,
            }),
        }
    }

    /// Create state backed by a file store in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be created.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StoreError> {
        let kv = Arc::new(FileStore::open(&config.data_dir)?);
        let assistant = ShoppingAssistant::from_config(&config.claude, &catalog::products());
        Ok(Self::new(config, kv, assistant))
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The catalog in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.inner.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.inner.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn reviews(&self) -> &ReviewStore {
        &self.inner.reviews
    }

    #[must_use]
    pub fn assistant(&self) -> &ShoppingAssistant {
        &self.inner.assistant
    }
}
