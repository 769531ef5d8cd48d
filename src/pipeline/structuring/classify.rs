//! Line roles in an orientation booklet.
//!
//! Headings are recognised by keyword, matched against the raw text layer.
//! Keywords are therefore spelled the way the text layer stores them:
//! reversed, in presentation forms. Reordering only happens once a line is
//! known to hold Arabic, so matching the raw glyphs keeps the two steps
//! independent.

use std::sync::LazyLock;

use regex::Regex;

use super::scores::{has_decimal, strip_numbers};

/// Category headings are short: raw length (trimmed) must stay below this.
const CATEGORY_MAX_CHARS: usize = 20;

/// Field-of-study keywords, as stored by the text layer.
const CATEGORY_KEYWORDS: &[&str] = &[
    "\u{FE8F}\u{FE8D}\u{FEA9}\u{FE81}", // آداب (arts)
    "\u{FEE1}\u{FEEE}\u{FEE0}\u{FECB}", // علوم (sciences)
    "\u{FE95}\u{FE8E}\u{FEF4}\u{FEBF}\u{FE8E}\u{FEF3}\u{FEAD}", // رياضيات (mathematics)
    "\u{FEA9}\u{FE8E}\u{FEBC}\u{FE98}\u{FED7}\u{FE8D}", // اقتصاد (economics)
    // تكنولوجيا (technology)
    "\u{FE8E}\u{FEF4}\u{FE9F}\u{FEEE}\u{FEDF}\u{FEEE}\u{FEE8}\u{FEDC}\u{FE97}",
    "\u{FEE5}\u{FEEE}\u{FEE8}\u{FED3}", // فنون (fine arts)
];

/// جامعة (university), as stored by the text layer.
const INSTITUTION_KEYWORD: &str = "\u{FE94}\u{FECC}\u{FEE3}\u{FE8E}\u{FE9F}";

/// Faculty / institute / school, indefinite and definite forms.
const SUB_UNIT_KEYWORDS: &[&str] = &[
    "\u{FE94}\u{FEF4}\u{FEE0}\u{FEDB}",                         // كلية
    "\u{FEAA}\u{FEEC}\u{FECC}\u{FEE3}",                         // معهد
    "\u{FE94}\u{FEB3}\u{FEAD}\u{FEAA}\u{FEE3}",                 // مدرسة
    "\u{FE94}\u{FEB3}\u{FEAD}\u{FEAA}\u{FEE4}\u{FEDF}\u{FE8D}", // المدرسة
    "\u{FE94}\u{FEF4}\u{FEE0}\u{FEDC}\u{FEDF}\u{FE8D}",         // الكلية
    "\u{FEAA}\u{FEEC}\u{FECC}\u{FEE4}\u{FEDF}\u{FE8D}",         // المعهد
];

static ANY_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Two or more consecutive digits: a code or a year, never a heading.
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,}").unwrap());

/// Role of one line. Headings carry their trimmed canonical text; a data
/// row carries its label (canonical text with numbers stripped, possibly
/// empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    Category(String),
    Institution(String),
    SubUnit(String),
    DataRow { label: String },
    Ignorable,
}

impl LineRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category(_) => "category",
            Self::Institution(_) => "institution",
            Self::SubUnit(_) => "sub_unit",
            Self::DataRow { .. } => "data_row",
            Self::Ignorable => "ignorable",
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Self::Category(_) | Self::Institution(_) | Self::SubUnit(_)
        )
    }
}

impl std::fmt::Display for LineRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a line. First matching rule wins:
///
/// 1. Category: no digit at all, short, carries a field-of-study keyword.
/// 2. Institution: carries the university keyword, no run of 2+ digits.
/// 3. SubUnit: carries a faculty/institute/school keyword, no run of 2+ digits.
/// 4. DataRow: carries at least one `digits.digits` number.
/// 5. Ignorable: anything else.
///
/// All tests look at `raw_line`; `canonical_line` only supplies the text
/// the role carries.
pub fn classify(raw_line: &str, canonical_line: &str) -> LineRole {
    if is_category(raw_line) {
        return LineRole::Category(canonical_line.trim().to_string());
    }

    let has_digit_run = DIGIT_RUN.is_match(raw_line);

    if raw_line.contains(INSTITUTION_KEYWORD) && !has_digit_run {
        return LineRole::Institution(canonical_line.trim().to_string());
    }

    if contains_any(raw_line, SUB_UNIT_KEYWORDS) && !has_digit_run {
        return LineRole::SubUnit(canonical_line.trim().to_string());
    }

    if has_decimal(raw_line) {
        return LineRole::DataRow {
            label: strip_numbers(canonical_line),
        };
    }

    LineRole::Ignorable
}

fn is_category(raw_line: &str) -> bool {
    !ANY_DIGIT.is_match(raw_line)
        && raw_line.trim().chars().count() < CATEGORY_MAX_CHARS
        && contains_any(raw_line, CATEGORY_KEYWORDS)
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| line.contains(keyword))
}
