// Composition tests — verifying that the pipeline stages chain together.
//
// These tests exercise the data flow between modules:
//   CSV -> Loader -> Upcoming filter -> Query score -> Sort -> Report
// without touching stdout. Filesystem loading uses a temp directory.

use std::io::Write;

use chrono::NaiveDate;

use confrank::dataset::loader::{load_from_path, load_from_reader};
use confrank::dataset::models::CoreRank;
use confrank::output::terminal::{render_report, ReportStyle};
use confrank::pipeline::{do_query, do_upcoming_deadlines, ReportOptions};
use confrank::scoring::query::Query;

const CSV: &str = "\
Conference,h5-index,CORE Rank,ERA Rank,Qualis Rank,Last Deadline,Name,Topics
MobiRob,40,A,A,A1,2026-12-01,Mobile Robotics Conference,Mobile Computing // Robotics
MobiAgents,55,A*,A,A1,2026-11-01,Mobile Agents Symposium,Mobile Systems // Autonomous Agents
DBConf,70,A*,A,A1,2026-11-15,Database Conference,Databases // Query Processing
OldRobots,30,B,B,B1,2026-09-01,Past Robots Workshop,Mobile Robots
";

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

// ============================================================
// Loader
// ============================================================

#[test]
fn loader_parses_typed_columns() {
    let rows = load_from_reader(CSV.as_bytes()).unwrap();
    assert_eq!(rows.len(), 4);

    let first = &rows[0];
    assert_eq!(first.conference, "MobiRob");
    assert_eq!(first.h5_index, Some(40));
    assert_eq!(first.core_rank, Some(CoreRank::A));
    assert_eq!(first.era_rank.as_deref(), Some("A"));
    assert_eq!(first.qualis_rank.as_deref(), Some("A1"));
    assert_eq!(
        first.last_deadline.map(|d| d.to_string()).as_deref(),
        Some("2026-12-01 00:00:00")
    );
    assert!(first.query_score.is_none());
}

#[test]
fn loader_accepts_any_column_order_and_blank_cells() {
    let csv = "\
Topics,Name,Conference,Last Deadline,Qualis Rank,ERA Rank,CORE Rank,h5-index
Agents,Agents Conf,AG,,, ,Unranked,
";
    let rows = load_from_reader(csv.as_bytes()).unwrap();
    let row = &rows[0];
    assert_eq!(row.conference, "AG");
    assert_eq!(row.topics, "Agents");
    assert_eq!(row.h5_index, None);
    assert_eq!(row.core_rank, None);
    assert_eq!(row.era_rank, None);
    assert_eq!(row.qualis_rank, None);
    assert_eq!(row.last_deadline, None);
}

#[test]
fn loader_reports_missing_header_with_suggestion() {
    let csv = "\
Conference,h5-index,Core Rank,ERA Rank,Qualis Rank,Last Deadline,Name,Topics
X,1,A,A,A1,2026-12-01,X Conf,Mobile
";
    let err = load_from_reader(csv.as_bytes()).unwrap_err().to_string();
    assert!(err.contains("`CORE Rank`"), "got: {err}");
    assert!(err.contains("did you mean `Core Rank`"), "got: {err}");
}

#[test]
fn loader_rejects_bad_h5_index() {
    let csv = "\
Conference,h5-index,CORE Rank,ERA Rank,Qualis Rank,Last Deadline,Name,Topics
X,lots,A,A,A1,2026-12-01,X Conf,Mobile
";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(format!("{err:#}").contains("data row 1"), "got: {err:#}");
}

#[test]
fn loader_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conferences.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CSV.as_bytes()).unwrap();

    let rows = load_from_path(&path).unwrap();
    assert_eq!(rows.len(), 4);
}

#[test]
fn loader_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"));
}

// ============================================================
// Chain: Loader -> Upcoming -> Score -> Sort -> Report
// ============================================================

#[test]
fn upcoming_report_ranks_by_score_then_deadline() {
    let rows = load_from_reader(CSV.as_bytes()).unwrap();
    let options = ReportOptions::with_query(Query::default_query());
    let ranked = do_upcoming_deadlines(rows, &options, 0, now());

    let order: Vec<&str> = ranked.iter().map(|r| r.conference.as_str()).collect();
    // Both mobile+agent/robot matches score 100, so the sooner deadline wins.
    // OldRobots' deadline has passed.
    assert_eq!(order, vec!["MobiAgents", "MobiRob", "DBConf"]);
    assert_eq!(ranked[0].query_score, Some(100));
    assert_eq!(ranked[1].query_score, Some(100));
    assert!(ranked[2].query_score.unwrap() < 100);
}

#[test]
fn query_report_without_query_uses_rank_order() {
    let rows = load_from_reader(CSV.as_bytes()).unwrap();
    let ranked = do_query(rows, &ReportOptions::default());
    let order: Vec<&str> = ranked.iter().map(|r| r.conference.as_str()).collect();
    // A* rows first (tie broken by h5-index ascending), then A, then B
    assert_eq!(order, vec!["MobiAgents", "DBConf", "MobiRob", "OldRobots"]);
}

#[test]
fn rendered_report_has_expected_columns() {
    let rows = load_from_reader(CSV.as_bytes()).unwrap();
    let options = ReportOptions::with_query(Query::default_query());
    let ranked = do_upcoming_deadlines(rows, &options, 0, now());

    let report = render_report(
        &ranked,
        ReportStyle {
            show_score: true,
            name_width: None,
        },
    );
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);

    let header: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(
        header,
        vec![
            "Conference", "h5-index", "CORE", "Rank", "ERA", "Rank", "Qualis", "Rank", "Last",
            "Deadline", "Name", "Query", "Score"
        ]
    );
    assert!(lines[1].contains("MobiAgents"));
    assert!(lines[1].contains("Nov 01"));
    assert!(lines[1].trim_end().ends_with("100"));
    assert!(!report.contains("Topics"));

    // Every line is padded to the same width
    let width = lines[0].chars().count();
    assert!(lines.iter().all(|l| l.chars().count() == width));
}

#[test]
fn rendered_report_truncates_accented_names() {
    let csv = "\
Conference,h5-index,CORE Rank,ERA Rank,Qualis Rank,Last Deadline,Name,Topics
SBRC,12,B,,B1,2026-12-01,Simpósio Brasileiro de Redes,Redes // Mobilidade
";
    let rows = load_from_reader(csv.as_bytes()).unwrap();
    let report = render_report(
        &rows,
        ReportStyle {
            show_score: false,
            name_width: Some(7),
        },
    );
    assert!(report.contains("Simpósi..."), "got: {report}");
}

#[test]
fn rendered_report_marks_missing_values() {
    let csv = "\
Conference,h5-index,CORE Rank,ERA Rank,Qualis Rank,Last Deadline,Name,Topics
AG,,,,,,A Very Long Conference Name,Agents
";
    let rows = load_from_reader(csv.as_bytes()).unwrap();
    let report = render_report(
        &rows,
        ReportStyle {
            show_score: false,
            name_width: Some(6),
        },
    );
    let cells: Vec<&str> = report.lines().nth(1).unwrap().split_whitespace().collect();
    // h5-index, CORE, ERA, Qualis and deadline are all missing
    assert_eq!(&cells[1..6], &["NaN", "NaN", "NaN", "NaN", "NaN"]);
    assert!(!report.contains("NaT"));
    assert!(report.contains("A Very..."));
    assert!(!report.contains("Query Score"));
}
