//! Review sources.
//!
//! A [`ReviewSource`] turns an app identifier into a bounded, ordered batch of
//! [`ReviewRecord`]s. The server and CLI only ever talk to the trait, so tests
//! can swap the Play Store client for a [`FixedReviewSource`].

mod play_store;
mod user_agent;

pub use play_store::PlayStoreClient;
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ReviewRecord;

/// Number of reviews requested per lookup.
pub const DEFAULT_MAX_COUNT: usize = 15_000;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "in";

/// Errors raised by a review source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Review request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Review source returned HTTP {0}")]
    Status(u16),
    #[error("Unexpected review payload: {0}")]
    Payload(String),
    #[error("Review fetch timed out after {0}s")]
    Timeout(u64),
}

/// Order in which the source returns reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    MostRelevant,
    #[default]
    Newest,
    Rating,
}

impl ReviewSort {
    /// Numeric code used by the Play Store RPC.
    pub fn code(&self) -> u8 {
        match self {
            Self::MostRelevant => 1,
            Self::Newest => 2,
            Self::Rating => 3,
        }
    }
}

impl FromStr for ReviewSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "most_relevant" | "relevant" => Ok(Self::MostRelevant),
            "newest" => Ok(Self::Newest),
            "rating" => Ok(Self::Rating),
            other => Err(format!("unknown review sort: {}", other)),
        }
    }
}

/// Parameters for a single bounded fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub language: String,
    pub country: String,
    pub sort: ReviewSort,
    pub max_count: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            sort: ReviewSort::Newest,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

/// Reviews returned by one fetch.
#[derive(Debug, Clone, Default)]
pub struct ReviewBatch {
    pub reviews: Vec<ReviewRecord>,
    /// Opaque token for resuming the listing. Never followed by the pipeline.
    pub continuation: Option<String>,
}

/// Something that can list reviews for an app.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch at most `options.max_count` reviews for `app_id`.
    async fn fetch(&self, app_id: &str, options: &FetchOptions)
        -> Result<ReviewBatch, FetchError>;
}

/// Review source that serves a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct FixedReviewSource {
    reviews: Vec<ReviewRecord>,
}

impl FixedReviewSource {
    pub fn new(reviews: Vec<ReviewRecord>) -> Self {
        Self { reviews }
    }
}

#[async_trait]
impl ReviewSource for FixedReviewSource {
    async fn fetch(
        &self,
        _app_id: &str,
        options: &FetchOptions,
    ) -> Result<ReviewBatch, FetchError> {
        Ok(ReviewBatch {
            reviews: self
                .reviews
                .iter()
                .take(options.max_count)
                .cloned()
                .collect(),
            continuation: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.language, "en");
        assert_eq!(options.country, "in");
        assert_eq!(options.sort, ReviewSort::Newest);
        assert_eq!(options.max_count, 15_000);
    }

    #[test]
    fn test_sort_codes() {
        assert_eq!(ReviewSort::MostRelevant.code(), 1);
        assert_eq!(ReviewSort::Newest.code(), 2);
        assert_eq!(ReviewSort::Rating.code(), 3);
        assert_eq!("Newest".parse::<ReviewSort>(), Ok(ReviewSort::Newest));
        assert_eq!(" most_relevant ".parse::<ReviewSort>(), Ok(ReviewSort::MostRelevant));
        assert!("oldest".parse::<ReviewSort>().is_err());
    }

    #[tokio::test]
    async fn test_fixed_source_respects_max_count() {
        let source = FixedReviewSource::new(vec![
            ReviewRecord::new("a", None),
            ReviewRecord::new("b", None),
            ReviewRecord::new("c", None),
        ]);
        let options = FetchOptions {
            max_count: 2,
            ..Default::default()
        };
        let batch = source.fetch("com.example", &options).await.unwrap();
        assert_eq!(batch.reviews.len(), 2);
        assert_eq!(batch.reviews[1].reviewer_name, "b");
        assert!(batch.continuation.is_none());
    }
}
