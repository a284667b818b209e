//! JSON reviewer listing.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::debug;

use super::super::AppState;
use super::types::{ReviewParams, ReviewsResponse};
use crate::services::local_today;

/// `GET /reviews?link=...&date=...`
///
/// Always answers 200; failures are reported in the body.
pub async fn api_reviews(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ReviewsResponse> {
    let query = match ReviewParams::extract(params).and_then(|p| p.into_query(local_today())) {
        Ok(query) => query,
        Err(e) => {
            debug!("Rejected reviewer lookup: {}", e);
            return Json(ReviewsResponse::error(&e));
        }
    };

    match state.reviewers.reviewers(&query).await {
        Ok(names) => Json(ReviewsResponse::success(names)),
        Err(e) => Json(ReviewsResponse::error(&e)),
    }
}
