//! Printable reviewer report.

pub mod layout;
mod pdf;

pub use layout::{layout_report, Font, Page, PageWriter, ReportLayout, RunKind, TextRun};
pub use pdf::render_pdf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ReviewerNames;

/// Download name offered for the report.
pub const REPORT_FILENAME: &str = "playstore_reviews.pdf";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Lay out and encode the report for `names` on `date`.
pub fn render_report(date: NaiveDate, names: &ReviewerNames) -> Result<Vec<u8>, ReportError> {
    render_pdf(&layout_report(date, names))
}
