// Composite multi-key sort.
//
// Query Score sorts descending (best match first), every other key ascending.
// Missing values always go last, whatever the direction. The sort is stable,
// so rows that tie on every key keep their dataset order.

use std::cmp::Ordering;

use anyhow::Result;

use crate::columns;
use crate::dataset::models::Conference;

/// A column the report can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    QueryScore,
    LastDeadline,
    CoreRank,
    EraRank,
    QualisRank,
    H5Index,
}

/// Tie-breaking keys applied after any query or deadline key.
pub const BASE_SORT: [SortKey; 4] = [
    SortKey::CoreRank,
    SortKey::EraRank,
    SortKey::QualisRank,
    SortKey::H5Index,
];

const ALL_KEYS: [SortKey; 6] = [
    SortKey::QueryScore,
    SortKey::LastDeadline,
    SortKey::CoreRank,
    SortKey::EraRank,
    SortKey::QualisRank,
    SortKey::H5Index,
];

impl SortKey {
    /// The dataset column this key reads.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::QueryScore => columns::QUERY_SCORE,
            SortKey::LastDeadline => columns::LAST_DEADLINE,
            SortKey::CoreRank => columns::CORE_RANK,
            SortKey::EraRank => columns::ERA_RANK,
            SortKey::QualisRank => columns::QUALIS_RANK,
            SortKey::H5Index => columns::H5_INDEX,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortKey::QueryScore)
    }

    /// Look up a key by its column name, ignoring case.
    pub fn parse(name: &str) -> Result<Self> {
        let wanted = name.trim();
        if let Some(key) = ALL_KEYS
            .iter()
            .find(|k| k.column().eq_ignore_ascii_case(wanted))
        {
            return Ok(*key);
        }
        let hint = columns::did_you_mean(wanted, ALL_KEYS.iter().map(|k| k.column()));
        anyhow::bail!("Unknown sort column `{wanted}`{hint}")
    }

    /// Compare two rows on this key alone.
    pub fn compare(&self, a: &Conference, b: &Conference) -> Ordering {
        let descending = self.is_descending();
        match self {
            SortKey::QueryScore => missing_last(a.query_score, b.query_score, descending),
            SortKey::LastDeadline => missing_last(a.last_deadline, b.last_deadline, descending),
            SortKey::CoreRank => missing_last(a.core_rank, b.core_rank, descending),
            SortKey::EraRank => {
                missing_last(a.era_rank.as_ref(), b.era_rank.as_ref(), descending)
            }
            SortKey::QualisRank => {
                missing_last(a.qualis_rank.as_ref(), b.qualis_rank.as_ref(), descending)
            }
            SortKey::H5Index => missing_last(a.h5_index, b.h5_index, descending),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Order present values by direction; missing values always last.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if descending {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `rows` by `keys`, first key most significant.
pub fn sort_rows(rows: &mut [Conference], keys: &[SortKey]) {
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
