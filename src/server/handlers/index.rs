//! Landing page handler.

use askama::Template;
use axum::response::{Html, IntoResponse};

use super::super::template_structs::IndexTemplate;
use crate::services::local_today;

/// Landing page with the reviewer lookup form.
pub async fn index() -> impl IntoResponse {
    let template = IndexTemplate {
        title: "Play Store Reviewers",
        today: local_today().format("%Y-%m-%d").to_string(),
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}
