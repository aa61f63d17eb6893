// CSV loader for the conference table.
//
// Columns are located by header name, so their order in the file doesn't
// matter. Cells are trimmed and an empty cell means "missing".

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::models::{Conference, CoreRank};
use crate::columns;

/// Datetime layouts tried in order before falling back to date-only layouts.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts. These resolve to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
];

/// One CSV record as it appears on disk, before typed parsing.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Conference")]
    conference: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "h5-index")]
    h5_index: Option<String>,
    #[serde(rename = "CORE Rank")]
    core_rank: Option<String>,
    #[serde(rename = "ERA Rank")]
    era_rank: Option<String>,
    #[serde(rename = "Qualis Rank")]
    qualis_rank: Option<String>,
    #[serde(rename = "Last Deadline")]
    last_deadline: Option<String>,
    #[serde(rename = "Topics")]
    topics: Option<String>,
}

/// Load the dataset from a CSV file on disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Conference>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;
    let rows = load_from_reader(file)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "Loaded conference dataset");
    Ok(rows)
}

/// Load the dataset from any reader producing CSV with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Conference>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header row")?.clone();
    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            // Suggest the present header that looks like the missing one
            let hint = columns::did_you_mean(required, headers.iter());
            anyhow::bail!("Dataset is missing the `{required}` column{hint}");
        }
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<RawRow>().enumerate() {
        let line = i + 1;
        let raw = record.with_context(|| format!("Malformed CSV record at data row {line}"))?;
        rows.push(parse_row(raw, line)?);
    }
    Ok(rows)
}

/// Convert a raw record into a typed `Conference`.
fn parse_row(raw: RawRow, line: usize) -> Result<Conference> {
    let h5_index = non_empty(raw.h5_index)
        .map(|v| {
            v.parse::<u32>().with_context(|| {
                format!(
                    "Invalid {} `{v}` at data row {line}",
                    columns::H5_INDEX
                )
            })
        })
        .transpose()?;

    let core_rank = match non_empty(raw.core_rank) {
        Some(v) => {
            let rank = CoreRank::parse(&v);
            if rank.is_none() {
                warn!(
                    conference = %raw.conference,
                    value = %v,
                    "Unrecognized CORE rank, treating as unranked"
                );
            }
            rank
        }
        None => None,
    };

    let last_deadline = non_empty(raw.last_deadline)
        .map(|v| {
            parse_deadline(&v).with_context(|| {
                format!(
                    "Invalid {} at data row {line}",
                    columns::LAST_DEADLINE
                )
            })
        })
        .transpose()?;

    debug!(conference = %raw.conference, "Parsed dataset row");

    Ok(Conference {
        conference: raw.conference,
        name: raw.name,
        h5_index,
        core_rank,
        era_rank: non_empty(raw.era_rank),
        qualis_rank: non_empty(raw.qualis_rank),
        last_deadline,
        topics: raw.topics.unwrap_or_default(),
        query_score: None,
    })
}

/// Parse a deadline cell in any of the layouts the dataset uses.
///
/// Date-only values resolve to midnight at the start of that day.
pub fn parse_deadline(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    anyhow::bail!("Unrecognized date `{raw}`")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
