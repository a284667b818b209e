//! Request parameters and JSON bodies for the reviewer endpoints.

use axum::extract::{rejection::QueryRejection, Query};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ReviewError;
use crate::models::{ReviewQuery, ReviewerNames};

/// Query params shared by `/reviews` and `/reviews-pdf`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReviewParams {
    /// App identifier or store link.
    pub link: Option<String>,
    /// Target day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl ReviewParams {
    /// Pick parameters out of decoded query pairs. A repeated key keeps its
    /// first value and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "link" => &mut params.link,
                "date" => &mut params.date,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Read params from the raw query extraction, reporting a rejected query
    /// string as a client error.
    pub fn extract(
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Result<Self, ReviewError> {
        query
            .map(|Query(pairs)| Self::from_pairs(pairs))
            .map_err(|e| ReviewError::MalformedQuery(e.body_text()))
    }

    /// Validate into a [`ReviewQuery`] against `today`.
    pub fn into_query(self, today: NaiveDate) -> Result<ReviewQuery, ReviewError> {
        ReviewQuery::from_params(self.link.as_deref(), self.date.as_deref(), today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerEntry {
    pub user: String,
}

/// Body of `/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewsResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Vec<ReviewerEntry>,
}

impl ReviewsResponse {
    pub fn success(names: ReviewerNames) -> Self {
        let data: Vec<_> = names
            .into_vec()
            .into_iter()
            .map(|user| ReviewerEntry { user })
            .collect();
        Self {
            status: ResponseStatus::Success,
            count: Some(data.len()),
            message: None,
            data,
        }
    }

    pub fn error(err: &ReviewError) -> Self {
        Self {
            status: ResponseStatus::Error,
            count: None,
            message: Some(err.to_string()),
            data: Vec::new(),
        }
    }
}
