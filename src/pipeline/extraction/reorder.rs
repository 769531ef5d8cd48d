//! Visual-to-logical line reordering for right-to-left text layers.
//!
//! The PDF text layer of a right-to-left booklet stores each line in the
//! order the glyphs were painted, left to right across the page. Reversing
//! the whole line restores reading order. Ligature expansion depends on that
//! order, so reversal runs before glyph folding.

use super::glyphs::normalize;

/// True for characters in the Arabic block or the Presentation Forms-B block.
pub fn is_arabic_char(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}' | '\u{FE70}'..='\u{FEFF}')
}

/// True if the line carries at least one Arabic-range character.
pub fn contains_arabic(line: &str) -> bool {
    line.chars().any(is_arabic_char)
}

/// Reverse and fold a raw line if it contains Arabic; otherwise return it as is.
///
/// Lines made only of digits, Latin letters or punctuation are never
/// reversed, so page numbers and codes keep their digit order.
pub fn maybe_reorder(raw_line: &str) -> String {
    if !contains_arabic(raw_line) {
        return raw_line.to_string();
    }

    let reversed: String = raw_line.chars().rev().collect();
    normalize(&reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_lines_are_not_reversed() {
        assert_eq!(maybe_reorder("12.50 11.00 13.25"), "12.50 11.00 13.25");
        assert_eq!(maybe_reorder("- 14 -"), "- 14 -");
    }

    #[test]
    fn latin_lines_are_not_reversed() {
        let line = "Faculty of Engineering (2024)";
        assert_eq!(maybe_reorder(line), line);
    }

    #[test]
    fn empty_line_passes_through() {
        assert_eq!(maybe_reorder(""), "");
    }

    #[test]
    fn reversed_presentation_forms_become_logical_text() {
        // Painted as "ﺓﺮﻫﺎﻘﻟﺍ ﺔﻌﻣﺎﺟ", reads as "جامعة القاهرة".
        let raw = "\u{FE93}\u{FEAE}\u{FEEB}\u{FE8E}\u{FED8}\u{FEDF}\u{FE8D} \
                   \u{FE94}\u{FECC}\u{FEE3}\u{FE8E}\u{FE9F}";
        let expected = "\u{062C}\u{0627}\u{0645}\u{0639}\u{0629} \
                        \u{0627}\u{0644}\u{0642}\u{0627}\u{0647}\u{0631}\u{0629}";
        assert_eq!(maybe_reorder(raw), expected);
    }

    #[test]
    fn ligature_expands_after_reversal() {
        // "ﺏﻼﻃ" painted left to right, "طلاب" in reading order.
        let raw = "\u{FE8F}\u{FEFC}\u{FEC3}";
        assert_eq!(maybe_reorder(raw), "\u{0637}\u{0644}\u{0627}\u{0628}");
    }

    #[test]
    fn canonical_arabic_line_is_still_reversed() {
        // Canonical letters are in range, so the line is treated as visual order.
        assert_eq!(maybe_reorder("\u{0628}\u{0627}"), "\u{0627}\u{0628}");
    }

    #[test]
    fn detects_arabic_block_edges() {
        assert!(is_arabic_char('\u{0600}'));
        assert!(is_arabic_char('\u{06FF}'));
        assert!(is_arabic_char('\u{FE70}'));
        assert!(is_arabic_char('\u{FEFC}'));
        assert!(!is_arabic_char('\u{05FF}'));
        assert!(!is_arabic_char('a'));
        assert!(!is_arabic_char('7'));
    }

    #[test]
    fn mixed_line_is_detected() {
        assert!(contains_arabic("15.75 \u{FEE1}"));
        assert!(!contains_arabic("15.75 abc"));
    }
}
