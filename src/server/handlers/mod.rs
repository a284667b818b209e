//! HTTP request handlers for the web server.

mod api;
mod index;
mod report;
mod reviews;
mod static_files;
pub mod types;

// Re-export handlers for use by the router
pub use api::health;
pub use index::index;
pub use report::download_report;
pub use reviews::api_reviews;
pub use static_files::{serve_css, serve_js};
