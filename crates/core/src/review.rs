//! Product reviews and submission validation.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ProductId, ReviewId};

/// Highest star rating a review can display.
pub const MAX_RATING: u8 = 5;

/// Rating preselected on the review form.
pub const DEFAULT_RATING: u8 = 5;

/// Review submission rejected before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Author name or comment is blank.
    #[error("Please fill in all fields")]
    MissingFields,
}

/// A stored product review.
///
/// Field names follow the persisted JSON layout (`productId`, `userName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    /// Display date, e.g. `6/14/2025`.
    pub date: String,
}

impl Review {
    /// Number of filled stars (ratings above 5 still show five).
    #[must_use]
    pub fn filled_stars(&self) -> u8 {
        self.rating.min(MAX_RATING)
    }
}

/// Review form input as typed by the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub name: String,
    pub rating: u8,
    pub comment: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rating: DEFAULT_RATING,
            comment: String::new(),
        }
    }
}

impl ReviewDraft {
    /// Check that the required fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::MissingFields` if the name or the comment is
    /// empty after trimming whitespace.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.name.trim().is_empty() || self.comment.trim().is_empty() {
            return Err(ReviewError::MissingFields);
        }
        Ok(())
    }

    /// Turn the draft into a review for `product_id`, stamped at `now`.
    ///
    /// The review id is the submission time in Unix milliseconds. The rating
    /// is stored as submitted; the form only offers 1 to 5.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::MissingFields` if validation fails.
    pub fn into_review<Tz>(
        self,
        product_id: ProductId,
        now: &DateTime<Tz>,
    ) -> Result<Review, ReviewError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.validate()?;
        Ok(Review {
            id: ReviewId::new(now.timestamp_millis().to_string()),
            product_id,
            user_name: self.name,
            rating: self.rating,
            comment: self.comment,
            date: now.format("%-m/%-d/%Y").to_string(),
        })
    }
}

/// Count and average of a product's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReviewSummary {
    pub count: usize,
    pub average: Option<f64>,
}

impl ReviewSummary {
    /// Summarize a list of reviews.
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // Review counts never approach f64 precision
        let average = f64::from(total) / reviews.len() as f64;
        Self {
            count: reviews.len(),
            average: Some(average),
        }
    }

    /// Average with one decimal, or `New` when there are no reviews.
    #[must_use]
    pub fn display_average(&self) -> String {
        self.average
            .map_or_else(|| "New".to_string(), |avg| format!("{avg:.1}"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn draft(name: &str, comment: &str) -> ReviewDraft {
        ReviewDraft {
            name: name.to_string(),
            rating: 4,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert_eq!(draft("", "great").validate(), Err(ReviewError::MissingFields));
        assert_eq!(draft("   ", "great").validate(), Err(ReviewError::MissingFields));
        assert_eq!(draft("Nimal", " \n").validate(), Err(ReviewError::MissingFields));
        assert!(draft("Nimal", "great").validate().is_ok());
    }

    #[test]
    fn test_into_review_stamps_id_and_date() {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let review = draft("Nimal", "Solid switches")
            .into_review(ProductId::new("1"), &now)
            .expect("valid draft");

        assert_eq!(review.id.as_str(), now.timestamp_millis().to_string());
        assert_eq!(review.date, "6/14/2025");
        assert_eq!(review.product_id.as_str(), "1");
        assert_eq!(review.rating, 4);
    }

    #[test]
    fn test_review_json_layout() {
        let json = r#"{"id":"1","productId":"3","userName":"Kasun","rating":5,"comment":"Loud","date":"1/2/2025"}"#;
        let review: Review = serde_json::from_str(json).expect("deserialize");
        assert_eq!(review.user_name, "Kasun");
        assert_eq!(review.product_id.as_str(), "3");
    }

    #[test]
    fn test_summary() {
        assert_eq!(ReviewSummary::from_reviews(&[]).display_average(), "New");

        let now = Utc::now();
        let mut reviews = Vec::new();
        for rating in [5, 4, 4] {
            let mut d = draft("A", "B");
            d.rating = rating;
            reviews.push(d.into_review(ProductId::new("1"), &now).expect("valid"));
        }
        let summary = ReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.display_average(), "4.3");
    }

    #[test]
    fn test_filled_stars_capped() {
        let now = Utc::now();
        let mut d = draft("A", "B");
        d.rating = 9;
        let review = d.into_review(ProductId::new("1"), &now).expect("valid");
        assert_eq!(review.rating, 9);
        assert_eq!(review.filled_stars(), 5);
    }
}
