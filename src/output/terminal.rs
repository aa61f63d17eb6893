// Text table rendering for the conference report.
//
// `render_report` builds the whole table as a String so it can be tested
// without capturing stdout. `display_report` adds terminal styling.

use colored::Colorize;

use crate::columns;
use crate::dataset::models::Conference;

/// Placeholder for any missing value, deadlines included.
const MISSING: &str = "NaN";
/// Deadline layout in the report, e.g. "Nov 15".
const DEADLINE_FORMAT: &str = "%b %d";

/// How the report should be laid out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStyle {
    /// Include the Query Score column.
    pub show_score: bool,
    /// Truncate the Name column to this many characters.
    pub name_width: Option<usize>,
}

/// Render rows as a right-justified text table, header line first.
///
/// Columns: Conference, h5-index, CORE Rank, ERA Rank, Qualis Rank,
/// Last Deadline, Name, and Query Score when `style.show_score` is set.
pub fn render_report(rows: &[Conference], style: ReportStyle) -> String {
    let (header, body) = build_cells(rows, style);
    let widths = column_widths(&header, &body);

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(join_row(&header, &widths));
    for row in &body {
        lines.push(join_row(row, &widths));
    }
    lines.join("\n")
}

/// Print the report, or a notice when nothing matched.
pub fn display_report(rows: &[Conference], style: ReportStyle) {
    if rows.is_empty() {
        println!("No conferences matched.");
        return;
    }

    let rendered = render_report(rows, style);
    let mut lines = rendered.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
        println!("{}", "-".repeat(header.chars().count()).dimmed());
    }
    for line in lines {
        println!("{line}");
    }
}

fn build_cells(rows: &[Conference], style: ReportStyle) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header: Vec<String> = [
        columns::CONFERENCE,
        columns::H5_INDEX,
        columns::CORE_RANK,
        columns::ERA_RANK,
        columns::QUALIS_RANK,
        columns::LAST_DEADLINE,
        columns::NAME,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();
    if style.show_score {
        header.push(columns::QUERY_SCORE.to_string());
    }

    let body = rows
        .iter()
        .map(|row| {
            let name = match style.name_width {
                Some(width) => super::truncate_chars(&row.name, width),
                None => row.name.clone(),
            };
            let mut cells = vec![
                row.conference.clone(),
                or_missing(row.h5_index.map(|h| h.to_string())),
                or_missing(row.core_rank.map(|r| r.to_string())),
                or_missing(row.era_rank.clone()),
                or_missing(row.qualis_rank.clone()),
                row.last_deadline
                    .map(|d| d.format(DEADLINE_FORMAT).to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
                name,
            ];
            if style.show_score {
                cells.push(or_missing(row.query_score.map(|s| s.to_string())));
            }
            cells
        })
        .collect();

    (header, body)
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}

fn column_widths(header: &[String], body: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn join_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join(" ")
}
