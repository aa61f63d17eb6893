// Multi-clause fuzzy query.
//
// A query is a list of clauses. Every clause must match (AND), and within a
// clause any term may match any topic (OR). Each clause scores the best
// partial_ratio across all (topic, term) pairs, and the query score is the
// weakest clause:
//
//   score = min over clauses ( max over topics x terms ( partial_ratio ) )
//
// So a conference only scores high when it's relevant to every clause.

use tracing::debug;

use super::fuzzy::partial_ratio;
use crate::dataset::models::{split_topics, Conference};

/// A fuzzy topic query: AND across clauses, OR within a clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Vec<String>>,
}

impl Query {
    /// Build a query from clauses of alternative terms.
    ///
    /// Blank terms are dropped, and so are clauses left with no terms.
    pub fn new<C, T>(clauses: C) -> Self
    where
        C: IntoIterator,
        C::Item: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let clauses = clauses
            .into_iter()
            .map(|clause| {
                clause
                    .into_iter()
                    .map(Into::<String>::into)
                    .filter(|term| !term.trim().is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|clause| !clause.is_empty())
            .collect();
        Self { clauses }
    }

    /// The built-in query: mobile, and agents or robots.
    pub fn default_query() -> Self {
        Self::new([vec!["mobile"], vec!["agent", "robot"]])
    }

    /// Parse CLI clause arguments, each a comma-separated list of terms.
    ///
    /// `["mobile", "agent, robot"]` becomes `[["mobile"], ["agent", "robot"]]`.
    pub fn from_clause_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            args.into_iter()
                .map(|arg| Self::parse_clause(arg.as_ref())),
        )
    }

    /// Split one clause argument into its alternative terms.
    pub fn parse_clause(arg: &str) -> Vec<String> {
        arg.split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Vec<String>] {
        &self.clauses
    }

    /// Score a `" // "`-separated topics string against this query (0-100).
    ///
    /// An empty query scores 0.
    pub fn score(&self, topics: &str) -> u8 {
        score(&self.clauses, topics)
    }

    /// Score one conference's topics against this query (0-100).
    pub fn score_conference(&self, conference: &Conference) -> u8 {
        score_topics(&self.clauses, conference.topic_list())
    }

    /// Set `query_score` on every row.
    pub fn apply(&self, rows: &mut [Conference]) {
        for row in rows.iter_mut() {
            let score = self.score_conference(row);
            debug!(conference = %row.conference, score, "Scored conference");
            row.query_score = Some(score);
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| format!("({})", clause.join(" OR ")))
            .collect();
        write!(f, "{}", rendered.join(" AND "))
    }
}

/// Score a topics string against raw clauses.
///
/// Terms and topics are trimmed and lowercased before comparison.
pub fn score(clauses: &[Vec<String>], topics: &str) -> u8 {
    score_topics(clauses, split_topics(topics))
}

/// Score already-split topics against raw clauses.
fn score_topics<'a, I>(clauses: &[Vec<String>], topics: I) -> u8
where
    I: IntoIterator<Item = &'a str>,
{
    let topics: Vec<String> = topics
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .collect();

    clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .map(|term| term.trim().to_lowercase())
                .flat_map(|term| {
                    topics
                        .iter()
                        .map(move |topic| partial_ratio(&term, topic))
                })
                .max()
                .unwrap_or(0)
        })
        .min()
        .unwrap_or(0)
}
