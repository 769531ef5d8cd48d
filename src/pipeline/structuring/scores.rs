use std::sync::LazyLock;

use regex::Regex;

use super::types::{Score, ScoreTriple};

/// A score: digits, a dot, digits.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+").unwrap());

/// Any number, with or without a fractional part. Stripped from labels.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// True if the line carries at least one score-shaped number.
pub fn has_decimal(line: &str) -> bool {
    DECIMAL.is_match(line)
}

/// Scores in storage order of the raw line, bound to periods 1..3.
///
/// Runs on the raw line, before reordering: the text layer stores the score
/// columns ahead of the reversed label, and reversal would also reverse the
/// digits of every number.
pub fn extract_scores(raw_line: &str) -> ScoreTriple {
    ScoreTriple::from_scores(
        DECIMAL
            .find_iter(raw_line)
            .map(|m| Score::new(m.as_str())),
    )
}

/// Remove every number from a canonical line and trim what is left.
pub fn strip_numbers(canonical_line: &str) -> String {
    NUMBER.replace_all(canonical_line, "").trim().to_string()
}
