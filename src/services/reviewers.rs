//! Fetch-then-filter pipeline shared by the server and the CLI.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::roster::collect_reviewers;
use crate::error::ReviewError;
use crate::models::{ReviewQuery, ReviewerNames};
use crate::scrapers::{FetchError, FetchOptions, ReviewSource};

/// Looks up the distinct reviewers of an app on a given day.
#[derive(Clone)]
pub struct ReviewerService {
    source: Arc<dyn ReviewSource>,
    options: FetchOptions,
    fetch_timeout: Duration,
}

impl ReviewerService {
    pub fn new(source: Arc<dyn ReviewSource>, options: FetchOptions, fetch_timeout: Duration) -> Self {
        Self {
            source,
            options,
            fetch_timeout,
        }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Run one bounded fetch for `query.app_id` and reduce it to reviewer names.
    pub async fn reviewers(&self, query: &ReviewQuery) -> Result<ReviewerNames, ReviewError> {
        let fetch = self.source.fetch(&query.app_id, &self.options);

        let batch = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(batch)) => batch,
            Ok(Err(e)) => {
                warn!("[{}] review fetch failed: {}", query.app_id, e);
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    "[{}] review fetch timed out after {:?}",
                    query.app_id, self.fetch_timeout
                );
                return Err(FetchError::Timeout(self.fetch_timeout.as_secs()).into());
            }
        };

        let names = collect_reviewers(&batch.reviews, query.target_date);
        info!(
            "[{}] {} distinct reviewers on {} ({} reviews fetched)",
            query.app_id,
            names.len(),
            query.target_date,
            batch.reviews.len()
        );

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Local, NaiveDate, TimeZone};

    use crate::models::ReviewRecord;
    use crate::scrapers::{FixedReviewSource, ReviewBatch};

    struct FailingSource;

    #[async_trait]
    impl ReviewSource for FailingSource {
        async fn fetch(&self, _: &str, _: &FetchOptions) -> Result<ReviewBatch, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    struct StalledSource;

    #[async_trait]
    impl ReviewSource for StalledSource {
        async fn fetch(&self, _: &str, _: &FetchOptions) -> Result<ReviewBatch, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ReviewBatch::default())
        }
    }

    fn query() -> ReviewQuery {
        ReviewQuery {
            link: "com.example".into(),
            app_id: "com.example".into(),
            target_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_reviewers_from_fixed_source() {
        let at = Local.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).single();
        let source = FixedReviewSource::new(vec![
            ReviewRecord::new("Alice", at),
            ReviewRecord::new("Alice", at),
            ReviewRecord::new("Bob", at),
        ]);
        let service = ReviewerService::new(
            Arc::new(source),
            FetchOptions::default(),
            Duration::from_secs(5),
        );

        let names = service.reviewers(&query()).await.unwrap();
        assert_eq!(names.as_slice(), ["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_surfaced() {
        let service = ReviewerService::new(
            Arc::new(FailingSource),
            FetchOptions::default(),
            Duration::from_secs(5),
        );
        let err = service.reviewers(&query()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Upstream(FetchError::Status(503))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_fetch_times_out() {
        let service = ReviewerService::new(
            Arc::new(StalledSource),
            FetchOptions::default(),
            Duration::from_secs(10),
        );
        let err = service.reviewers(&query()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Upstream(FetchError::Timeout(10))));
    }
}
