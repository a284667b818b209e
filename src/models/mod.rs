//! Data models for playreviews.

mod review;

pub use review::{ReviewQuery, ReviewRecord, ReviewerNames};
