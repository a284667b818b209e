//! Web server for reviewer lookups.
//!
//! Serves:
//! - `/reviews`: JSON list of distinct reviewers for an app on a day
//! - `/reviews-pdf`: the same list as a downloadable PDF report
//! - `/`: a landing page driving both endpoints

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use handlers::types::{ReviewParams, ReviewerEntry, ReviewsResponse, ResponseStatus};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::scrapers::{PlayStoreClient, ReviewSource};
use crate::services::ReviewerService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub reviewers: ReviewerService,
}

impl AppState {
    /// State backed by the Play Store client.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = PlayStoreClient::new(settings.request_timeout(), settings.user_agent.as_deref())?;
        Ok(Self::with_source(Arc::new(client), settings))
    }

    /// State backed by an arbitrary review source.
    pub fn with_source(source: Arc<dyn ReviewSource>, settings: &Settings) -> Self {
        Self {
            reviewers: ReviewerService::new(
                source,
                settings.fetch_options(),
                settings.fetch_timeout(),
            ),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::{Local, TimeZone};
    use tower::ServiceExt;

    use crate::models::ReviewRecord;
    use crate::scrapers::{FetchError, FetchOptions, FixedReviewSource, ReviewBatch};

    struct FailingSource;

    #[async_trait]
    impl ReviewSource for FailingSource {
        async fn fetch(&self, _: &str, _: &FetchOptions) -> Result<ReviewBatch, FetchError> {
            Err(FetchError::Payload("listing unavailable".to_string()))
        }
    }

    fn sample_reviews() -> Vec<ReviewRecord> {
        let day = |h| Local.with_ymd_and_hms(2024, 3, 10, h, 0, 0).single();
        let next_day = Local.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).single();
        vec![
            ReviewRecord::new("Alice", day(18)),
            ReviewRecord::new("bob ", day(12)),
            ReviewRecord::new("Alice", day(10)),
            ReviewRecord::new("Carol", next_day),
            ReviewRecord::new("Ghost", None),
            ReviewRecord::new("   ", day(8)),
        ]
    }

    fn setup_test_app() -> axum::Router {
        let source = FixedReviewSource::new(sample_reviews());
        create_router(AppState::with_source(Arc::new(source), &Settings::default()))
    }

    fn setup_failing_app() -> axum::Router {
        create_router(AppState::with_source(
            Arc::new(FailingSource),
            &Settings::default(),
        ))
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn text_body(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_reviews_success() {
        let response = get(
            setup_test_app(),
            "/reviews?link=https%3A%2F%2Fplay.google.com%2Fstore%2Fapps%2Fdetails%3Fid%3Dcom.example%26hl%3Den&date=2024-03-10",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "status": "success",
                "count": 2,
                "data": [{"user": "Alice"}, {"user": "bob"}]
            })
        );
    }

    #[tokio::test]
    async fn test_reviews_repeated_params_use_first_value() {
        let response = get(
            setup_test_app(),
            "/reviews?link=com.example&link=com.other&date=2024-03-10&date=2999-01-01",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 2);
    }

    #[tokio::test]
    async fn test_report_repeated_params_use_first_value() {
        let response = get(
            setup_test_app(),
            "/reviews-pdf?link=com.example&link=com.other&date=2024-03-10&date=bad",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reviews_empty_day() {
        let response = get(setup_test_app(), "/reviews?link=com.example&date=2020-01-01").await;
        let json = json_body(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_reviews_missing_params() {
        let response = get(setup_test_app(), "/reviews").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "message": "Link and date required",
                "data": []
            })
        );
    }

    #[tokio::test]
    async fn test_reviews_blank_link() {
        let response = get(setup_test_app(), "/reviews?link=%20%20&date=2024-03-10").await;
        let json = json_body(response).await;
        assert_eq!(json["message"], "Link and date required");
    }

    #[tokio::test]
    async fn test_reviews_malformed_date() {
        let response = get(setup_test_app(), "/reviews?link=com.example&date=10-03-2024").await;
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Invalid date format, expected YYYY-MM-DD");
        assert_eq!(json["data"], serde_json::json!([]));
        assert!(json.get("count").is_none());
    }

    #[tokio::test]
    async fn test_reviews_future_date() {
        let response = get(setup_test_app(), "/reviews?link=com.example&date=2999-01-01").await;
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Future date not allowed");
    }

    #[tokio::test]
    async fn test_reviews_upstream_failure() {
        let response = get(setup_failing_app(), "/reviews?link=com.example&date=2024-03-10").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(
            json["message"],
            "Unexpected review payload: listing unavailable"
        );
    }

    #[tokio::test]
    async fn test_report_download() {
        let response = get(setup_test_app(), "/reviews-pdf?link=com.example&date=2024-03-10").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .unwrap(),
            "attachment; filename=\"playstore_reviews.pdf\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"%PDF-"));
        let doc = lopdf::Document::load_mem(&body).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_report_missing_params() {
        let response = get(setup_test_app(), "/reviews-pdf?link=com.example").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text_body(response).await, "Link and date required");
    }

    #[tokio::test]
    async fn test_report_validates_date_before_fetching() {
        let response = get(setup_failing_app(), "/reviews-pdf?link=com.example&date=2024-3-10").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(setup_failing_app(), "/reviews-pdf?link=com.example&date=2999-01-01").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text_body(response).await, "Future date not allowed");
    }

    #[tokio::test]
    async fn test_report_upstream_failure() {
        let response = get(setup_failing_app(), "/reviews-pdf?link=com.example&date=2024-03-10").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text_body(response).await.contains("listing unavailable"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = get(setup_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_body(response).await;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Play Store Reviewers"));
        assert!(html.contains(&crate::services::local_today().format("%Y-%m-%d").to_string()));
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(setup_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_css() {
        let response = get(setup_test_app(), "/static/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap_or(""));
        assert!(content_type.unwrap_or("").contains("css"));
    }

    #[tokio::test]
    async fn test_static_js() {
        let response = get(setup_test_app(), "/static/app.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text_body(response).await.contains("/reviews-pdf?"));
    }
}
