//! Request bodies and response envelopes for the Play Store review RPC.

use std::sync::LazyLock;

use chrono::{Local, TimeZone};
use regex::Regex;
use serde_json::{json, Value};

use super::super::{FetchError, ReviewSort};
use crate::models::ReviewRecord;

/// RPC id of the review listing call.
const REVIEWS_RPC_ID: &str = "UsvDTd";

/// Largest page the RPC reliably serves.
pub(crate) const MAX_COUNT_EACH_FETCH: usize = 199;

/// batchexecute responses carry an anti-XSSI prefix before the JSON body.
static ENVELOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\]\}'\n\n([\s\S]+)").unwrap());

/// One page of decoded reviews.
#[derive(Debug, Default)]
pub(crate) struct ReviewPage {
    pub reviews: Vec<ReviewRecord>,
    pub next_token: Option<String>,
}

/// Build the `f.req` form value for one page request.
pub(crate) fn build_request_body(
    app_id: &str,
    sort: ReviewSort,
    count: usize,
    token: Option<&str>,
) -> String {
    let pagination = json!([count, null, token]);
    let filters = json!([null, null, null, null, null, null, null, null, null]);
    let request = json!([null, null, [2, sort.code(), pagination, null, filters], [app_id, 7]]);

    json!([[[REVIEWS_RPC_ID, request.to_string(), null, "generic"]]]).to_string()
}

/// Decode a batchexecute response body.
///
/// Returns `Ok(None)` when the payload carries no review list, which is how
/// the endpoint reports both "no more reviews" and unknown apps.
pub(crate) fn parse_response(body: &str) -> Result<Option<ReviewPage>, FetchError> {
    let captures = ENVELOPE
        .captures(body)
        .ok_or_else(|| FetchError::Payload("missing response envelope".to_string()))?;

    let envelope: Value = serde_json::from_str(&captures[1])
        .map_err(|e| FetchError::Payload(format!("invalid envelope JSON: {}", e)))?;

    let Some(inner) = envelope[0][2].as_str() else {
        return Ok(None);
    };

    let data: Value = serde_json::from_str(inner)
        .map_err(|e| FetchError::Payload(format!("invalid review JSON: {}", e)))?;

    let Some(items) = data[0].as_array() else {
        return Ok(None);
    };

    let next_token = nth_from_end(&data, 2)
        .and_then(|v| nth_from_end(v, 1))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Some(ReviewPage {
        reviews: items.iter().map(parse_review).collect(),
        next_token,
    }))
}

fn parse_review(item: &Value) -> ReviewRecord {
    ReviewRecord {
        review_id: item[0].as_str().map(str::to_string),
        reviewer_name: item[1][0].as_str().unwrap_or_default().to_string(),
        content: item[4].as_str().map(str::to_string),
        score: item[2].as_u64().and_then(|s| u8::try_from(s).ok()),
        submitted_at: item[5][0]
            .as_i64()
            .and_then(|secs| Local.timestamp_opt(secs, 0).single()),
    }
}

fn nth_from_end(value: &Value, n: usize) -> Option<&Value> {
    let items = value.as_array()?;
    items.len().checked_sub(n).and_then(|i| items.get(i))
}
