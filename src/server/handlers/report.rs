//! PDF reviewer report download.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use super::super::AppState;
use super::types::ReviewParams;
use crate::error::ReviewError;
use crate::report::{render_report, REPORT_FILENAME};
use crate::services::local_today;

fn error_response(err: &ReviewError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, err.to_string()).into_response()
}

/// `GET /reviews-pdf?link=...&date=...`
pub async fn download_report(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match ReviewParams::extract(params).and_then(|p| p.into_query(local_today())) {
        Ok(query) => query,
        Err(e) => {
            debug!("Rejected report request: {}", e);
            return error_response(&e);
        }
    };

    let names = match state.reviewers.reviewers(&query).await {
        Ok(names) => names,
        Err(e) => return error_response(&e),
    };

    let bytes = match render_report(query.target_date, &names) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("[{}] report rendering failed: {}", query.app_id, e);
            return error_response(&ReviewError::from(e));
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response()
}
