//! Error types for the review pipeline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::report::ReportError;
use crate::scrapers::FetchError;

/// Message returned when `link` or `date` is missing.
pub const MISSING_PARAMETER_MESSAGE: &str = "Link and date required";

/// Errors raised while turning a request into a reviewer list.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Link and date required")]
    MissingParameter,
    #[error("Invalid query string: {0}")]
    MalformedQuery(String),
    #[error("Invalid date format, expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("Future date not allowed")]
    FutureDateRejected(NaiveDate),
    #[error("{0}")]
    Upstream(#[from] FetchError),
    #[error("Failed to render report: {0}")]
    Render(#[from] ReportError),
}

impl ReviewError {
    /// Whether the error was caused by the request itself rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReviewError::MissingParameter
                | ReviewError::MalformedQuery(_)
                | ReviewError::MalformedDate(_)
                | ReviewError::FutureDateRejected(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert!(ReviewError::MissingParameter.is_client_error());
        assert!(ReviewError::MalformedQuery("bad".into()).is_client_error());
        assert!(ReviewError::MalformedDate("2024-13-01".into()).is_client_error());
        let tomorrow = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(ReviewError::FutureDateRejected(tomorrow).is_client_error());
    }

    #[test]
    fn test_collaborator_errors_are_not_client_errors() {
        let err = ReviewError::Upstream(FetchError::Timeout(30));
        assert!(!err.is_client_error());
        let io = std::io::Error::other("disk full");
        assert!(!ReviewError::Render(ReportError::Io(io)).is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ReviewError::MissingParameter.to_string(),
            MISSING_PARAMETER_MESSAGE
        );
        let tomorrow = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(
            ReviewError::FutureDateRejected(tomorrow).to_string(),
            "Future date not allowed"
        );
        assert_eq!(
            ReviewError::Upstream(FetchError::Timeout(30)).to_string(),
            "Review fetch timed out after 30s"
        );
    }
}
