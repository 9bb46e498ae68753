//! Review submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
};
use rapidkeys_core::review::DEFAULT_RATING;
use rapidkeys_core::{ProductId, ReviewDraft};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::htmx::{HxTrigger, ToastLevel};
use crate::routes::products::ReviewsView;
use crate::state::AppState;

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub name: String,
    pub rating: Option<u8>,
    #[serde(default)]
    pub comment: String,
}

impl From<ReviewForm> for ReviewDraft {
    fn from(form: ReviewForm) -> Self {
        Self {
            name: form.name,
            rating: form.rating.unwrap_or(DEFAULT_RATING),
            comment: form.comment,
        }
    }
}

/// Reviews fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/reviews.html")]
pub struct ReviewsTemplate {
    pub reviews: ReviewsView,
}

/// Post a review and return the product's refreshed reviews.
///
/// Blank fields are rejected with a 422 and an error toast; nothing is
/// stored.
#[instrument(skip(state, form), fields(product_id = %id))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<(HxTrigger, ReviewsTemplate)> {
    let id = ProductId::new(id);
    if state.product(&id).is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let draft = ReviewDraft::from(form);
    let product_id = id.clone();
    let store_state = state.clone();
    let reviews = tokio::task::spawn_blocking(move || {
        store_state.reviews().submit(&product_id, draft)
    })
    .await
    .map_err(|e| AppError::Internal(format!("review task failed: {e}")))??;

    add_breadcrumb("reviews", "Posted review", Some(&[("product_id", id.as_str())]));

    Ok((
        HxTrigger::new().toast("Review posted successfully!", ToastLevel::Success),
        ReviewsTemplate {
            reviews: ReviewsView::new(&id, &reviews),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rating_defaults_to_five() {
        let draft = ReviewDraft::from(ReviewForm {
            name: "Nimal".to_string(),
            rating: None,
            comment: "Great".to_string(),
        });
        assert_eq!(draft.rating, 5);
    }
}
