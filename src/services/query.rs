//! Request parsing: app identifiers and target dates.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::error::ReviewError;
use crate::models::ReviewQuery;

/// Strict `YYYY-MM-DD`. chrono alone accepts single-digit months and days.
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const ID_MARKER: &str = "id=";

/// Pull the app identifier out of a store link.
///
/// `https://play.google.com/store/apps/details?id=com.example&hl=en` yields
/// `com.example`. Input without an `id=` marker is returned unchanged.
pub fn extract_app_id(link: &str) -> &str {
    match link.find(ID_MARKER) {
        Some(start) => {
            let rest = &link[start + ID_MARKER.len()..];
            rest.split('&').next().unwrap_or(rest)
        }
        None => link,
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_target_date(input: &str) -> Result<NaiveDate, ReviewError> {
    if !ISO_DATE.is_match(input) {
        return Err(ReviewError::MalformedDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ReviewError::MalformedDate(input.to_string()))
}

/// Parse a date and reject anything after `today`.
pub fn validate_target_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ReviewError> {
    let date = parse_target_date(input)?;
    if date > today {
        return Err(ReviewError::FutureDateRejected(date));
    }
    Ok(date)
}

/// Local calendar date of the server.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl ReviewQuery {
    /// Build a query from raw request parameters.
    ///
    /// Both parameters are trimmed; a missing or blank one is a
    /// [`ReviewError::MissingParameter`].
    pub fn from_params(
        link: Option<&str>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ReviewError> {
        let link = link.map(str::trim).unwrap_or_default();
        let date = date.map(str::trim).unwrap_or_default();

        if link.is_empty() || date.is_empty() {
            return Err(ReviewError::MissingParameter);
        }

        let target_date = validate_target_date(date, today)?;

        Ok(Self {
            link: link.to_string(),
            app_id: extract_app_id(link).to_string(),
            target_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_from_store_url() {
        assert_eq!(
            extract_app_id("https://play.google.com/store/apps/details?id=com.whatsapp&hl=en_IN"),
            "com.whatsapp"
        );
    }

    #[test]
    fn test_extract_without_trailing_params() {
        assert_eq!(
            extract_app_id("https://play.google.com/store/apps/details?id=com.whatsapp"),
            "com.whatsapp"
        );
    }

    #[test]
    fn test_extract_bare_identifier_unchanged() {
        assert_eq!(extract_app_id("com.whatsapp"), "com.whatsapp");
        assert_eq!(extract_app_id("not a link at all"), "not a link at all");
    }

    #[test]
    fn test_extract_uses_first_marker() {
        assert_eq!(extract_app_id("x?id=first&ref=id=second"), "first");
    }

    #[test]
    fn test_extract_empty_identifier() {
        assert_eq!(extract_app_id("details?id=&hl=en"), "");
    }

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_target_date("2024-03-10").unwrap(), day(2024, 3, 10));
        assert_eq!(parse_target_date("2024-02-29").unwrap(), day(2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        for input in [
            "",
            "2024-3-10",
            "2024-03-1",
            "10-03-2024",
            "2024/03/10",
            "2024-03-10T00:00:00",
            " 2024-03-10",
            "2024-13-01",
            "2023-02-29",
            "2024-04-31",
            "+2024-03-10",
            "yesterday",
        ] {
            let err = parse_target_date(input).unwrap_err();
            assert!(
                matches!(err, ReviewError::MalformedDate(_)),
                "expected MalformedDate for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_validate_today_is_allowed() {
        let today = day(2024, 3, 10);
        assert_eq!(validate_target_date("2024-03-10", today).unwrap(), today);
        assert_eq!(
            validate_target_date("2020-01-01", today).unwrap(),
            day(2020, 1, 1)
        );
    }

    #[test]
    fn test_validate_tomorrow_is_rejected() {
        let today = day(2024, 3, 10);
        let err = validate_target_date("2024-03-11", today).unwrap_err();
        assert!(matches!(err, ReviewError::FutureDateRejected(d) if d == day(2024, 3, 11)));
    }

    #[test]
    fn test_validate_malformed_before_future_check() {
        let err = validate_target_date("9999-99-99", day(2024, 3, 10)).unwrap_err();
        assert!(matches!(err, ReviewError::MalformedDate(_)));
    }

    #[test]
    fn test_query_from_params() {
        let query = ReviewQuery::from_params(
            Some("  https://play.google.com/store/apps/details?id=com.example&hl=en "),
            Some(" 2024-03-10 "),
            day(2024, 3, 10),
        )
        .unwrap();
        assert_eq!(query.app_id, "com.example");
        assert_eq!(query.target_date, day(2024, 3, 10));
    }

    #[test]
    fn test_query_missing_params() {
        let today = day(2024, 3, 10);
        for (link, date) in [
            (None, None),
            (Some("com.example"), None),
            (None, Some("2024-03-10")),
            (Some("   "), Some("2024-03-10")),
            (Some("com.example"), Some("")),
        ] {
            let err = ReviewQuery::from_params(link, date, today).unwrap_err();
            assert!(matches!(err, ReviewError::MissingParameter));
        }
    }
}
