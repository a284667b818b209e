//! Service layer for the reviewer lookup.
//!
//! Request parsing, the day filter, and the fetch pipeline live here so the
//! web server and the CLI share one implementation.

pub mod query;
pub mod reviewers;
pub mod roster;

pub use query::{extract_app_id, local_today, parse_target_date, validate_target_date};
pub use reviewers::ReviewerService;
pub use roster::{collect_reviewers, ReviewerRoster, RosterStats};
