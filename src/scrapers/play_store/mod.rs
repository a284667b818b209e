//! Google Play Store review client.

mod payload;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use self::payload::{build_request_body, parse_response, MAX_COUNT_EACH_FETCH};
use super::{resolve_user_agent, FetchError, FetchOptions, ReviewBatch, ReviewSource};

/// batchexecute endpoint serving the review listing RPC.
pub const PLAY_STORE_ENDPOINT: &str = "https://play.google.com/_/PlayStoreUi/data/batchexecute";

/// Review source backed by the Play Store's web RPC.
#[derive(Clone)]
pub struct PlayStoreClient {
    client: Client,
    endpoint: String,
}

impl PlayStoreClient {
    /// Create a client with the given per-request timeout and user agent config
    /// (see [`resolve_user_agent`]).
    pub fn new(timeout: Duration, user_agent_config: Option<&str>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(resolve_user_agent(user_agent_config))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: PLAY_STORE_ENDPOINT.to_string(),
        })
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch_page(
        &self,
        app_id: &str,
        options: &FetchOptions,
        count: usize,
        token: Option<&str>,
    ) -> Result<Option<payload::ReviewPage>, FetchError> {
        let body = build_request_body(app_id, options.sort, count, token);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("hl", options.language.as_str()), ("gl", options.country.as_str())])
            .form(&[("f.req", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        parse_response(&text)
    }
}

#[async_trait]
impl ReviewSource for PlayStoreClient {
    async fn fetch(
        &self,
        app_id: &str,
        options: &FetchOptions,
    ) -> Result<ReviewBatch, FetchError> {
        let mut reviews = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let remaining = options.max_count.saturating_sub(reviews.len());
            if remaining == 0 {
                break;
            }
            let count = remaining.min(MAX_COUNT_EACH_FETCH);

            debug!(
                "[{}] requesting {} reviews ({} collected)",
                app_id,
                count,
                reviews.len()
            );

            let Some(page) = self
                .fetch_page(app_id, options, count, token.as_deref())
                .await?
            else {
                token = None;
                break;
            };

            let received = page.reviews.len();
            reviews.extend(page.reviews);
            token = page.next_token;

            if token.is_none() || received == 0 {
                break;
            }
        }

        reviews.truncate(options.max_count);
        debug!("[{}] fetched {} reviews", app_id, reviews.len());

        Ok(ReviewBatch {
            reviews,
            continuation: token,
        })
    }
}
