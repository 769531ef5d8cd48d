use serde::{Deserialize, Serialize};

use super::context::HeadingContext;
use crate::config::DEFAULT_PERIODS;

/// Number of score periods a data row can carry.
pub const PERIOD_COUNT: usize = 3;

// ═══════════════════════════════════════════
// Scores
// ═══════════════════════════════════════════

/// One score exactly as printed, e.g. `"12.50"`.
///
/// The text is kept verbatim so exports do not reformat trailing zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(String);

impl Score {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value. Arabic-Indic and extended Arabic-Indic digits are
    /// read as their ASCII counterparts. `None` for any other script.
    pub fn value(&self) -> Option<f64> {
        let ascii: Option<String> = self.0.chars().map(ascii_digit).collect();
        ascii?.parse().ok()
    }
}

fn ascii_digit(ch: char) -> Option<char> {
    match ch {
        '0'..='9' | '.' => Some(ch),
        '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(ch as u32 - 0x06F0, 10),
        _ => None,
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Up to three scores bound by position to the configured periods.
/// A missing position is `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreTriple([Option<Score>; PERIOD_COUNT]);

impl ScoreTriple {
    /// Bind scores to periods in the order given. Anything past the third is dropped.
    pub fn from_scores(scores: impl IntoIterator<Item = Score>) -> Self {
        let mut slots: [Option<Score>; PERIOD_COUNT] = Default::default();
        for (slot, score) in slots.iter_mut().zip(scores) {
            *slot = Some(score);
        }
        Self(slots)
    }

    pub fn get(&self, period: usize) -> Option<&Score> {
        self.0.get(period).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Score>> {
        self.0.iter().map(Option::as_ref)
    }

    /// Number of periods that carry a score.
    pub fn present(&self) -> usize {
        self.0.iter().filter(|s| s.is_some()).count()
    }
}

/// Period labels used as score column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Periods([String; PERIOD_COUNT]);

impl Periods {
    pub fn new(labels: [String; PERIOD_COUNT]) -> Self {
        Self(labels)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl Default for Periods {
    fn default() -> Self {
        Self(DEFAULT_PERIODS.map(String::from))
    }
}

// ═══════════════════════════════════════════
// Record
// ═══════════════════════════════════════════

/// One labelled data row stamped with the headings in force when it was read.
///
/// Headings never declared before the row stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub category: Option<String>,
    pub institution: Option<String>,
    pub sub_unit: Option<String>,
    pub label: String,
    pub scores: ScoreTriple,
}

impl Record {
    pub fn new(context: &HeadingContext, label: impl Into<String>, scores: ScoreTriple) -> Self {
        Self {
            category: context.category.clone(),
            institution: context.institution.clone(),
            sub_unit: context.sub_unit.clone(),
            label: label.into(),
            scores,
        }
    }
}
