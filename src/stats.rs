//! Aggregate figures over a library snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::book::BookRecord;

/// Totals and per-key counts for a set of records
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Stats {
    /// Number of records
    pub total: usize,
    /// Records marked as read
    pub read_count: usize,
    /// `read_count / total * 100`, rounded to two decimals; 0 for an empty library
    pub percent_read: f64,
    /// Count per genre label, including labels outside the fixed set
    pub by_genre: BTreeMap<String, usize>,
    /// Count per author name
    pub by_author: BTreeMap<String, usize>,
    /// Count per decade bucket, see [`decade_of`]
    pub by_decade: BTreeMap<i64, usize>,
}

impl Stats {
    /// Records not yet read
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.total.saturating_sub(self.read_count)
    }
}

/// Decade bucket of a year: 1983 becomes 1980, 2000 stays 2000
///
/// Floors towards negative infinity, so -5 becomes -10. Years whose decade
/// lies below `i64::MIN` land in the `i64::MIN` bucket.
#[must_use]
pub fn decade_of(year: i64) -> i64 {
    year.saturating_sub(year.rem_euclid(10))
}

/// Percentage of `part` in `whole`, rounded to two decimals, ties to even
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let ratio = part as f64 / whole as f64 * 100.0;
    (ratio * 100.0).round_ties_even() / 100.0
}

/// Compute [`Stats`] over `records` in a single pass
#[must_use]
pub fn stats(records: &[BookRecord]) -> Stats {
    let mut stats = Stats { total: records.len(), ..Stats::default() };

    for record in records {
        if record.read_status {
            stats.read_count = stats.read_count.saturating_add(1);
        }
        bump(stats.by_genre.entry(record.genre.label().to_string()).or_default());
        bump(stats.by_author.entry(record.author.clone()).or_default());
        bump(stats.by_decade.entry(decade_of(record.publication_year)).or_default());
    }

    stats.percent_read = percentage(stats.read_count, stats.total);
    stats
}

/// Increment a counter
fn bump(count: &mut usize) {
    *count = count.saturating_add(1);
}
