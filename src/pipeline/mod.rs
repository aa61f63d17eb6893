// Report pipeline — filter, score, sort.
//
// Two entry points mirror the two reports the tool produces:
//   do_query:              every conference, ranked by relevance
//   do_upcoming_deadlines: only conferences whose deadline hasn't passed,
//                          ranked by relevance then by nearest deadline

pub mod sort;

use chrono::{NaiveDateTime, TimeDelta};
use tracing::info;

use crate::dataset::models::Conference;
use crate::scoring::query::Query;
use sort::{sort_rows, SortKey, BASE_SORT};

/// Knobs shared by both reports.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Topic query. An empty query disables scoring.
    pub query: Query,
    /// Keys used after the query/deadline keys (default: `BASE_SORT`).
    pub tie_break: Vec<SortKey>,
    /// Drop scored rows below this query score.
    pub min_score: Option<u8>,
    /// Keep only the first N rows of the report.
    pub limit: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            query: Query::default(),
            tie_break: BASE_SORT.to_vec(),
            min_score: None,
            limit: None,
        }
    }
}

impl ReportOptions {
    pub fn with_query(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

/// Rank every conference, by query relevance when a query is given.
pub fn do_query(mut rows: Vec<Conference>, options: &ReportOptions) -> Vec<Conference> {
    let keys = if options.query.is_empty() {
        options.tie_break.clone()
    } else {
        options.query.apply(&mut rows);
        key_chain(&[SortKey::QueryScore], &options.tie_break)
    };

    sort_rows(&mut rows, &keys);
    finish(rows, options)
}

/// Keep conferences with a deadline still ahead of `now`, then rank them.
///
/// A row is kept when `deadline - day_pad days >= now`. Rows without a
/// deadline are dropped.
pub fn do_upcoming_deadlines(
    rows: Vec<Conference>,
    options: &ReportOptions,
    day_pad: i64,
    now: NaiveDateTime,
) -> Vec<Conference> {
    let total = rows.len();
    let mut rows = filter_upcoming(rows, day_pad, now);
    info!(
        kept = rows.len(),
        dropped = total - rows.len(),
        day_pad,
        "Filtered to upcoming deadlines"
    );

    let keys = if options.query.is_empty() {
        key_chain(&[SortKey::LastDeadline], &options.tie_break)
    } else {
        options.query.apply(&mut rows);
        key_chain(
            &[SortKey::QueryScore, SortKey::LastDeadline],
            &options.tie_break,
        )
    };

    sort_rows(&mut rows, &keys);
    finish(rows, options)
}

/// Drop rows whose deadline (shifted back by `day_pad` days) is before `now`.
pub fn filter_upcoming(rows: Vec<Conference>, day_pad: i64, now: NaiveDateTime) -> Vec<Conference> {
    rows.into_iter()
        .filter(|row| match row.last_deadline {
            Some(deadline) => is_upcoming(deadline, day_pad, now),
            None => false,
        })
        .collect()
}

/// `deadline - day_pad days >= now`, without overflowing.
///
/// A pad too large to represent pushes the shifted deadline past the edge of
/// the calendar: far past for a positive pad, far future for a negative one.
fn is_upcoming(deadline: NaiveDateTime, day_pad: i64, now: NaiveDateTime) -> bool {
    TimeDelta::try_days(day_pad)
        .and_then(|pad| deadline.checked_sub_signed(pad))
        .map(|shifted| shifted >= now)
        .unwrap_or(day_pad < 0)
}

/// Leading keys followed by the tie-breakers, without repeats.
fn key_chain(leading: &[SortKey], tie_break: &[SortKey]) -> Vec<SortKey> {
    let mut keys = leading.to_vec();
    for key in tie_break {
        if !keys.contains(key) {
            keys.push(*key);
        }
    }
    keys
}

/// Apply the score threshold and row limit.
fn finish(rows: Vec<Conference>, options: &ReportOptions) -> Vec<Conference> {
    let rows = rows.into_iter().filter(|row| match (options.min_score, row.query_score) {
        (Some(min), Some(score)) => score >= min,
        _ => true,
    });

    match options.limit {
        Some(limit) => rows.take(limit).collect(),
        None => rows.collect(),
    }
}
