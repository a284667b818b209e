//! playreviews - distinct Play Store reviewers of an app on a given day.
//!
//! Fetches a bounded, newest-first listing of an app's reviews, keeps the
//! ones submitted on the requested day, and reduces them to the distinct
//! reviewer names in first-seen order. Results are served as JSON or as a
//! PDF report over HTTP, or printed by the CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scrapers;
pub mod server;
pub mod services;

pub use error::ReviewError;
