//! Review persistence.
//!
//! All reviews live under one key as a JSON object mapping product id to that
//! product's reviews, newest first:
//!
//! ```json
//! {"1": [{"id": "1718000000000", "productId": "1", "userName": "Kasun",
//!         "rating": 5, "comment": "Great!", "date": "6/10/2024"}]}
//! ```
//!
//! A missing or unreadable record means "no reviews yet". It is never an
//! error on the read path.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Local;
use rapidkeys_core::{ProductId, Review, ReviewDraft, ReviewError};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;

use crate::store::{KeyValueStore, StoreError};

/// Key holding the serialized review map.
pub const REVIEWS_KEY: &str = "rapidkeys_reviews";

/// Every well-formed stored review, keyed by product.
pub type ReviewMap = BTreeMap<ProductId, Vec<Review>>;

/// The stored record as raw JSON. Entries are only decoded one product at a
/// time, so a bad entry never hides or clobbers its neighbours.
type ReviewRecord = Map<String, Value>;

/// Errors from submitting a review.
#[derive(Debug, Error)]
pub enum ReviewStoreError {
    /// The draft failed validation; nothing was written.
    #[error(transparent)]
    Invalid(#[from] ReviewError),

    #[error("review store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to serialize reviews: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("review store lock poisoned")]
    Poisoned,
}

/// Reviews over a key-value store.
///
/// Submissions run their read-modify-write under a lock, so concurrent
/// writers in this process never drop each other's reviews.
pub struct ReviewStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for ReviewStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewStore").finish_non_exhaustive()
    }
}

impl ReviewStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Reviews for one product, newest first.
    ///
    /// An absent or malformed entry reads as no reviews; other products'
    /// entries are not looked at.
    #[must_use]
    pub fn list(&self, product_id: &ProductId) -> Vec<Review> {
        self.load_record()
            .get(product_id.as_str())
            .map(|entry| decode_entry(product_id.as_str(), entry))
            .unwrap_or_default()
    }

    /// Every product's reviews. Malformed entries are skipped.
    #[must_use]
    pub fn load_all(&self) -> ReviewMap {
        self.load_record()
            .iter()
            .map(|(key, entry)| (ProductId::new(key.as_str()), decode_entry(key, entry)))
            .filter(|(_, reviews)| !reviews.is_empty())
            .collect()
    }

    /// Validate `draft`, stamp it now and store it ahead of the product's
    /// existing reviews.
    ///
    /// Only this product's entry is rewritten; every other entry is written
    /// back exactly as it was read. Returns the product's updated reviews.
    ///
    /// # Errors
    ///
    /// - `ReviewStoreError::Invalid` if the name or comment is blank (no write)
    /// - `ReviewStoreError::Store` if the record cannot be written
    #[instrument(skip(self, draft), fields(product_id = %product_id))]
    pub fn submit(
        &self,
        product_id: &ProductId,
        draft: ReviewDraft,
    ) -> Result<Vec<Review>, ReviewStoreError> {
        let review = draft.into_review(product_id.clone(), &Local::now())?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ReviewStoreError::Poisoned)?;

        let mut record = self.load_record();
        let key = product_id.as_str();
        let mut reviews = record
            .get(key)
            .map(|entry| decode_entry(key, entry))
            .unwrap_or_default();
        reviews.insert(0, review);

        record.insert(key.to_string(), serde_json::to_value(&reviews)?);
        self.kv
            .set(REVIEWS_KEY, &Value::Object(record).to_string())?;

        tracing::info!(count = reviews.len(), "Review posted");
        Ok(reviews)
    }

    /// Delete every stored review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewStoreError::Store` if the record cannot be removed.
    pub fn clear(&self) -> Result<(), ReviewStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ReviewStoreError::Poisoned)?;
        self.kv.remove(REVIEWS_KEY)?;
        Ok(())
    }

    /// Whether the backing store answers reads. Used by the readiness check.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.kv.get(REVIEWS_KEY).is_ok()
    }

    /// The raw record. Absent, unreadable or non-object data reads as empty.
    fn load_record(&self) -> ReviewRecord {
        let raw = match self.kv.get(REVIEWS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ReviewRecord::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored reviews");
                return ReviewRecord::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(record)) => record,
            Ok(_) => {
                tracing::warn!("Stored reviews are not a JSON object, ignoring");
                ReviewRecord::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored reviews are not valid JSON, ignoring");
                ReviewRecord::new()
            }
        }
    }
}

fn decode_entry(product_id: &str, entry: &Value) -> Vec<Review> {
    Vec::<Review>::deserialize(entry).unwrap_or_else(|e| {
        tracing::warn!(product_id, error = %e, "Stored reviews for product are malformed, ignoring");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use crate::store::MemoryStore;

    use super::*;

    fn store() -> (Arc<MemoryStore>, ReviewStore) {
        let kv = Arc::new(MemoryStore::new());
        let reviews = ReviewStore::new(kv.clone());
        (kv, reviews)
    }

    fn draft(name: &str, rating: u8, comment: &str) -> ReviewDraft {
        ReviewDraft {
            name: name.to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_empty_store_has_no_reviews() {
        let (_, reviews) = store();
        assert!(reviews.list(&ProductId::new("1")).is_empty());
    }

    #[test]
    fn test_corrupt_record_reads_as_empty() {
        let (kv, reviews) = store();
        kv.set(REVIEWS_KEY, "{not json").expect("set");
        assert!(reviews.list(&ProductId::new("1")).is_empty());
    }

    #[test]
    fn test_submit_prepends_and_persists() {
        let (kv, reviews) = store();
        let id = ProductId::new("3");

        reviews.submit(&id, draft("Nimal", 4, "Solid bass")).expect("first");
        let updated = reviews
            .submit(&id, draft("Kasun", 5, "Great for gaming"))
            .expect("second");

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].user_name, "Kasun");
        assert_eq!(updated[1].user_name, "Nimal");
        assert_eq!(reviews.list(&id), updated);

        let raw = kv.get(REVIEWS_KEY).expect("get").expect("stored");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["3"][0]["userName"], "Kasun");
        assert_eq!(json["3"][0]["productId"], "3");
    }

    #[test]
    fn test_submit_keeps_other_products() {
        let (_, reviews) = store();
        reviews
            .submit(&ProductId::new("1"), draft("A", 5, "Clicky"))
            .expect("submit");
        reviews
            .submit(&ProductId::new("2"), draft("B", 3, "Light"))
            .expect("submit");

        assert_eq!(reviews.list(&ProductId::new("1")).len(), 1);
        assert_eq!(reviews.list(&ProductId::new("2")).len(), 1);
    }

    #[test]
    fn test_blank_name_rejected_without_write() {
        let (kv, reviews) = store();
        let result = reviews.submit(&ProductId::new("1"), draft("  ", 5, "Nice"));

        assert!(matches!(
            result,
            Err(ReviewStoreError::Invalid(ReviewError::MissingFields))
        ));
        assert_eq!(kv.get(REVIEWS_KEY).expect("get"), None);
    }

    #[test]
    fn test_submit_over_corrupt_record_starts_fresh() {
        let (kv, reviews) = store();
        kv.set(REVIEWS_KEY, "[]garbage").expect("set");

        let updated = reviews
            .submit(&ProductId::new("1"), draft("A", 5, "Nice"))
            .expect("submit");
        assert_eq!(updated.len(), 1);
        assert_eq!(reviews.load_all().len(), 1);
    }

    #[test]
    fn test_clear() {
        let (_, reviews) = store();
        reviews
            .submit(&ProductId::new("1"), draft("A", 5, "Nice"))
            .expect("submit");
        reviews.clear().expect("clear");
        assert!(reviews.load_all().is_empty());
        assert!(reviews.is_readable());
    }

    fn valid_entry(product_id: &str, name: &str) -> serde_json::Value {
        serde_json::json!([{
            "id": "1718000000000",
            "productId": product_id,
            "userName": name,
            "rating": 5,
            "comment": "Solid",
            "date": "6/10/2024"
        }])
    }

    #[test]
    fn test_malformed_entry_does_not_hide_others() {
        let (kv, reviews) = store();
        let record = serde_json::json!({
            "1": [{"id": "x", "productId": "1", "userName": "A", "rating": 4.5,
                   "comment": "Half star", "date": "6/10/2024"}],
            "2": valid_entry("2", "Kasun"),
        });
        kv.set(REVIEWS_KEY, &record.to_string()).expect("set");

        assert!(reviews.list(&ProductId::new("1")).is_empty());
        let listed = reviews.list(&ProductId::new("2"));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_name, "Kasun");
        assert_eq!(reviews.load_all().len(), 1);
    }

    #[test]
    fn test_submit_rewrites_only_its_own_entry() {
        let (kv, reviews) = store();
        let malformed = serde_json::json!([{"rating": "five"}]);
        let record = serde_json::json!({
            "1": malformed,
            "2": valid_entry("2", "Kasun"),
        });
        kv.set(REVIEWS_KEY, &record.to_string()).expect("set");

        reviews
            .submit(&ProductId::new("3"), draft("Nimal", 4, "Good mic"))
            .expect("submit");

        let raw = kv.get(REVIEWS_KEY).expect("get").expect("stored");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["1"], malformed);
        assert_eq!(json["2"], valid_entry("2", "Kasun"));
        assert_eq!(json["3"][0]["userName"], "Nimal");
    }

    #[test]
    fn test_submit_replaces_malformed_entry_for_same_product() {
        let (kv, reviews) = store();
        kv.set(REVIEWS_KEY, r#"{"1": "not a list", "2": []}"#).expect("set");

        let updated = reviews
            .submit(&ProductId::new("1"), draft("A", 5, "Nice"))
            .expect("submit");

        assert_eq!(updated.len(), 1);
        let raw = kv.get(REVIEWS_KEY).expect("get").expect("stored");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["2"], serde_json::json!([]));
    }
}
