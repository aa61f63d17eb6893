use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use confrank::config::Config;
use confrank::dataset::loader;
use confrank::output::terminal::{display_report, ReportStyle};
use confrank::pipeline::sort::{SortKey, BASE_SORT};
use confrank::pipeline::{do_query, do_upcoming_deadlines, ReportOptions};
use confrank::scoring::query::Query;

/// confrank: rank academic conferences by topic relevance and deadline.
///
/// Scores each conference's topics against a fuzzy query (AND across
/// clauses, OR within a clause) and prints a ranked table.
#[derive(Parser)]
#[command(name = "confrank", version, about)]
struct Cli {
    /// Path to the conference CSV (overrides CONFRANK_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Truncate conference names to this many characters
    #[arg(long, global = true)]
    name_width: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every conference by relevance to the query
    Query {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Rank conferences whose submission deadline is still ahead
    Upcoming {
        #[command(flatten)]
        report: ReportArgs,

        /// Only keep deadlines at least this many days away (overrides CONFRANK_DAY_PAD)
        #[arg(long, allow_hyphen_values = true)]
        pad_days: Option<i64>,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// A query clause: comma-separated alternative terms (repeat for AND).
    /// Defaults to `--clause mobile --clause "agent, robot"`.
    #[arg(long = "clause", value_name = "TERMS")]
    clauses: Vec<String>,

    /// Skip query scoring entirely
    #[arg(long, conflicts_with = "clauses")]
    no_query: bool,

    /// Tie-break columns, in order (default: CORE Rank, ERA Rank, Qualis Rank, h5-index)
    #[arg(long = "sort", value_name = "COLUMN")]
    sort: Vec<String>,

    /// Drop conferences scoring below this (0-100)
    #[arg(long, conflicts_with = "no_query", value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Show at most this many conferences
    #[arg(long)]
    limit: Option<usize>,
}

impl ReportArgs {
    fn into_options(self) -> Result<ReportOptions> {
        let query = if self.no_query {
            Query::default()
        } else if self.clauses.is_empty() {
            Query::default_query()
        } else {
            Query::from_clause_args(&self.clauses)
        };

        let tie_break = if self.sort.is_empty() {
            BASE_SORT.to_vec()
        } else {
            self.sort
                .iter()
                .map(|name| SortKey::parse(name))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(ReportOptions {
            query,
            tie_break,
            min_score: self.min_score,
            limit: self.limit,
        })
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging goes to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("confrank=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.data {
        config.data_path = path;
    }
    config.require_dataset()?;

    let rows = loader::load_from_path(&config.data_path)?;

    match cli.command {
        Commands::Query { report } => {
            let options = report.into_options()?;
            let scored = !options.query.is_empty();
            if scored {
                info!(query = %options.query, "Ranking conferences by query");
            }

            let ranked = do_query(rows, &options);
            print_title("All conferences", &options);
            display_report(
                &ranked,
                ReportStyle {
                    show_score: scored,
                    name_width: cli.name_width,
                },
            );
        }

        Commands::Upcoming { report, pad_days } => {
            let options = report.into_options()?;
            let scored = !options.query.is_empty();
            let day_pad = pad_days.unwrap_or(config.day_pad);
            let now = chrono::Local::now().naive_local();
            if scored {
                info!(query = %options.query, day_pad, "Ranking upcoming deadlines by query");
            }

            let ranked = do_upcoming_deadlines(rows, &options, day_pad, now);
            print_title("Upcoming deadlines", &options);
            display_report(
                &ranked,
                ReportStyle {
                    show_score: scored,
                    name_width: cli.name_width,
                },
            );
        }
    }

    Ok(())
}

fn print_title(title: &str, options: &ReportOptions) {
    if options.query.is_empty() {
        println!("\n{}\n", format!("=== {title} ===").bold());
    } else {
        println!(
            "\n{}\n",
            format!("=== {title}: {} ===", options.query).bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn min_score_conflicts_with_no_query() {
        let result = Cli::try_parse_from(["confrank", "query", "--no-query", "--min-score", "50"]);
        assert!(result.is_err());
    }

    #[test]
    fn min_score_with_clauses_parses() {
        let cli = Cli::try_parse_from([
            "confrank",
            "upcoming",
            "--clause",
            "mobile",
            "--min-score",
            "50",
        ])
        .unwrap();
        match cli.command {
            Commands::Upcoming { report, .. } => {
                let options = report.into_options().unwrap();
                assert_eq!(options.min_score, Some(50));
                assert!(!options.query.is_empty());
            }
            Commands::Query { .. } => panic!("expected upcoming"),
        }
    }
}
