//! Day filtering and reviewer deduplication.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{ReviewRecord, ReviewerNames};

/// Counts of records dropped by a [`ReviewerRoster`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub missing_timestamp: usize,
    pub other_day: usize,
    pub blank_name: usize,
    pub duplicate: usize,
}

/// Lazy single-pass iterator over the distinct reviewers of one day.
///
/// Yields trimmed names in first-occurrence order. The set of names already
/// yielded lives inside the iterator, so every run starts from scratch.
pub struct ReviewerRoster<'a, I>
where
    I: Iterator<Item = &'a ReviewRecord>,
{
    records: I,
    target_date: NaiveDate,
    seen: HashSet<&'a str>,
    stats: RosterStats,
}

impl<'a, I> ReviewerRoster<'a, I>
where
    I: Iterator<Item = &'a ReviewRecord>,
{
    pub fn new(records: I, target_date: NaiveDate) -> Self {
        Self {
            records,
            target_date,
            seen: HashSet::new(),
            stats: RosterStats::default(),
        }
    }

    /// Records skipped so far.
    pub fn stats(&self) -> RosterStats {
        self.stats
    }
}

impl<'a, I> Iterator for ReviewerRoster<'a, I>
where
    I: Iterator<Item = &'a ReviewRecord>,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            let Some(day) = record.submitted_on() else {
                self.stats.missing_timestamp += 1;
                continue;
            };
            if day != self.target_date {
                self.stats.other_day += 1;
                continue;
            }

            let name = record.reviewer_name.trim();
            if name.is_empty() {
                self.stats.blank_name += 1;
                continue;
            }
            if !self.seen.insert(name) {
                self.stats.duplicate += 1;
                continue;
            }
            return Some(name);
        }
        None
    }
}

/// Collect the distinct reviewers of `target_date` from `records`.
pub fn collect_reviewers(records: &[ReviewRecord], target_date: NaiveDate) -> ReviewerNames {
    let mut roster = ReviewerRoster::new(records.iter(), target_date);
    let names: Vec<String> = roster.by_ref().map(str::to_string).collect();

    let stats = roster.stats();
    debug!(
        "{} reviewers on {} from {} records (skipped: {} undated, {} other day, {} blank, {} repeat)",
        names.len(),
        target_date,
        records.len(),
        stats.missing_timestamp,
        stats.other_day,
        stats.blank_name,
        stats.duplicate
    );

    ReviewerNames::from_unique(names)
}
