// Fuzzy string similarity.
//
// `ratio` is the normalized InDel similarity: the share of characters that
// survive when one string is turned into the other using only insertions
// and deletions. With L = longest common subsequence:
//
//   ratio(a, b) = 100 * 2L / (|a| + |b|)
//
// `partial_ratio` slides the shorter string across the longer one and keeps
// the best `ratio` against any window, including the partial windows that
// hang off either end. A term that appears verbatim inside a longer topic
// scores 100. Strings of equal length are slid over each other both ways.

/// Normalized InDel similarity between two strings, from 0.0 to 100.0.
///
/// Two empty strings are identical and score 100.0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` of the shorter string against any window of the longer one,
/// rounded to an integer percentage. Equal-length strings are tried in both
/// directions.
///
/// Returns 0 if either string is empty.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() {
        (&a, &b)
    } else {
        (&b, &a)
    };

    // Equal lengths have no "shorter" side, so slide both ways
    let best = if shorter.len() == longer.len() {
        best_window_ratio(shorter, longer).max(best_window_ratio(longer, shorter))
    } else {
        best_window_ratio(shorter, longer)
    };

    to_percent(best)
}

/// Slide `shorter` over `longer`, including windows that hang off either end.
fn best_window_ratio(shorter: &[char], longer: &[char]) -> f64 {
    let m = shorter.len() as isize;
    let n = longer.len() as isize;
    let mut best = 0.0_f64;

    for start in (1 - m)..n {
        let lo = start.max(0) as usize;
        let hi = (start + m).min(n) as usize;
        let score = ratio_chars(shorter, &longer[lo..hi]);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Longest common subsequence length, single-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diag = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Round half-to-even and clamp into 0..=100.
fn to_percent(score: f64) -> u8 {
    score.round_ties_even().clamp(0.0, 100.0) as u8
}
