//! Review records and the values derived from them.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single review as returned by a review source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Upstream review identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    /// Display name of the reviewer. May be empty or padded with whitespace.
    #[serde(default)]
    pub reviewer_name: String,
    /// Review text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Star rating (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Submission time, absent for malformed upstream records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Local>>,
}

impl ReviewRecord {
    pub fn new(reviewer_name: impl Into<String>, submitted_at: Option<DateTime<Local>>) -> Self {
        Self {
            reviewer_name: reviewer_name.into(),
            submitted_at,
            ..Default::default()
        }
    }

    /// Local calendar day the review was submitted on.
    pub fn submitted_on(&self) -> Option<NaiveDate> {
        self.submitted_at.map(|at| at.date_naive())
    }
}

/// A validated request for the reviewers of one app on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Identifier or store link as supplied by the caller.
    pub link: String,
    /// App identifier extracted from `link`.
    pub app_id: String,
    pub target_date: NaiveDate,
}

/// Distinct, trimmed, non-empty reviewer names in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReviewerNames(Vec<String>);

impl ReviewerNames {
    /// Wrap names that already satisfy the distinct/non-empty invariant.
    pub(crate) fn from_unique(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ReviewerNames {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
