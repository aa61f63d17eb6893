// Column names of the conference dataset, plus "did you mean" lookup
// for names typed by the user or found in a CSV header.

pub const CONFERENCE: &str = "Conference";
pub const NAME: &str = "Name";
pub const H5_INDEX: &str = "h5-index";
pub const CORE_RANK: &str = "CORE Rank";
pub const ERA_RANK: &str = "ERA Rank";
pub const QUALIS_RANK: &str = "Qualis Rank";
pub const LAST_DEADLINE: &str = "Last Deadline";
pub const TOPICS: &str = "Topics";
pub const QUERY_SCORE: &str = "Query Score";

/// Headers that must be present in the dataset file.
pub const REQUIRED: [&str; 8] = [
    CONFERENCE,
    NAME,
    H5_INDEX,
    CORE_RANK,
    ERA_RANK,
    QUALIS_RANK,
    LAST_DEADLINE,
    TOPICS,
];

/// Minimum similarity for a candidate to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Jaro-Winkler similarity, slightly penalized for case-only differences
/// so an exact-case candidate wins a tie.
fn case_aware_jaro_winkler(a: &str, b: &str) -> f64 {
    let base = strsim::jaro_winkler(&a.to_lowercase(), &b.to_lowercase());
    let case_penalty = a
        .chars()
        .zip(b.chars())
        .filter(|(ac, bc)| ac != bc && ac.eq_ignore_ascii_case(bc))
        .count() as f64
        * 0.02;
    base - case_penalty
}

/// Find the candidate most similar to `name`, if any is close enough.
pub fn closest<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| (candidate, case_aware_jaro_winkler(name, candidate)))
        .filter(|(_, similarity)| *similarity >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// Format a " (did you mean `x`?)" hint, or an empty string.
pub fn did_you_mean<'a, I>(name: &str, candidates: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match closest(name, candidates) {
        Some(candidate) => format!(" (did you mean `{candidate}`?)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_header() {
        assert_eq!(closest("Core Rank", REQUIRED), Some(CORE_RANK));
        assert_eq!(closest("h5 index", REQUIRED), Some(H5_INDEX));
    }

    #[test]
    fn no_suggestion_for_unrelated_name() {
        assert_eq!(closest("zzzz", REQUIRED), None);
        assert_eq!(did_you_mean("zzzz", REQUIRED), "");
    }
}
