// Data models — one struct per dataset row.
//
// These are the types that flow through the scoring and sort pipeline.
// They're separate from the loader so other modules can use them without
// depending on the csv crate.

use chrono::NaiveDateTime;

/// Separator between topics in the "Topics" column.
pub const TOPIC_SEPARATOR: &str = " // ";

/// A single conference from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Conference {
    /// Acronym, e.g. "MobiSys"
    pub conference: String,
    /// Full conference name
    pub name: String,
    pub h5_index: Option<u32>,
    pub core_rank: Option<CoreRank>,
    pub era_rank: Option<String>,
    pub qualis_rank: Option<String>,
    pub last_deadline: Option<NaiveDateTime>,
    /// Raw topics cell, entries separated by `TOPIC_SEPARATOR`
    pub topics: String,
    /// Relevance to the active query (0-100). `None` until a query is applied.
    pub query_score: Option<u8>,
}

impl Conference {
    /// Iterate over the individual topics of this conference.
    pub fn topic_list(&self) -> impl Iterator<Item = &str> {
        split_topics(&self.topics)
    }
}

/// Split a raw topics cell into its individual topics.
pub fn split_topics(topics: &str) -> impl Iterator<Item = &str> {
    topics.split(TOPIC_SEPARATOR)
}

/// CORE conference ranking. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoreRank {
    AStar,
    A,
    B,
    C,
}

impl CoreRank {
    /// Parse a CORE rank cell. Anything outside A*/A/B/C is treated as unranked.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A*" => Some(CoreRank::AStar),
            "A" => Some(CoreRank::A),
            "B" => Some(CoreRank::B),
            "C" => Some(CoreRank::C),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoreRank::AStar => "A*",
            CoreRank::A => "A",
            CoreRank::B => "B",
            CoreRank::C => "C",
        }
    }
}

impl std::fmt::Display for CoreRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_rank_order_is_categorical() {
        assert!(CoreRank::AStar < CoreRank::A);
        assert!(CoreRank::A < CoreRank::B);
        assert!(CoreRank::B < CoreRank::C);
    }

    #[test]
    fn core_rank_unknown_is_none() {
        assert_eq!(CoreRank::parse("National"), None);
        assert_eq!(CoreRank::parse(""), None);
        assert_eq!(CoreRank::parse(" A* "), Some(CoreRank::AStar));
    }

    #[test]
    fn topic_list_splits_on_separator() {
        let conf = Conference {
            conference: "X".to_string(),
            name: "X Conf".to_string(),
            h5_index: None,
            core_rank: None,
            era_rank: None,
            qualis_rank: None,
            last_deadline: None,
            topics: "Mobile Computing // Robotics/AI".to_string(),
            query_score: None,
        };
        let topics: Vec<&str> = conf.topic_list().collect();
        assert_eq!(topics, vec!["Mobile Computing", "Robotics/AI"]);
    }
}
