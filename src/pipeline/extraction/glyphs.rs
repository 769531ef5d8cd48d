//! Arabic presentation-form folding.
//!
//! PDF text layers store the glyph that was drawn, not the letter that was
//! meant: the same letter comes out as one of up to four positional shapes
//! (isolated, final, initial, medial) from the Presentation Forms-B block.
//! This module folds every shape back onto the canonical letter from the
//! Arabic block, expands Lam-Alef ligatures into two letters and drops the
//! tatweel used for justification.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Arabic tatweel (kashida). Pure decoration, removed from output.
pub const TATWEEL: char = '\u{0640}';

const LAM: char = '\u{0644}';

/// Contiguous presentation-form runs: (first codepoint, shapes in run, letter).
///
/// Two-shape runs are the non-joining letters (isolated, final). Four-shape
/// runs are the dual-joining letters (isolated, final, initial, medial).
const LETTER_FORMS: &[(u32, u32, char)] = &[
    (0xFE80, 1, '\u{0621}'), // hamza
    (0xFE81, 2, '\u{0622}'), // alef with madda above
    (0xFE83, 2, '\u{0623}'), // alef with hamza above
    (0xFE85, 2, '\u{0624}'), // waw with hamza above
    (0xFE87, 2, '\u{0625}'), // alef with hamza below
    (0xFE89, 4, '\u{0626}'), // yeh with hamza above
    (0xFE8D, 2, '\u{0627}'), // alef
    (0xFE8F, 4, '\u{0628}'), // beh
    (0xFE93, 2, '\u{0629}'), // teh marbuta
    (0xFE95, 4, '\u{062A}'), // teh
    (0xFE99, 4, '\u{062B}'), // theh
    (0xFE9D, 4, '\u{062C}'), // jeem
    (0xFEA1, 4, '\u{062D}'), // hah
    (0xFEA5, 4, '\u{062E}'), // khah
    (0xFEA9, 2, '\u{062F}'), // dal
    (0xFEAB, 2, '\u{0630}'), // thal
    (0xFEAD, 2, '\u{0631}'), // reh
    (0xFEAF, 2, '\u{0632}'), // zain
    (0xFEB1, 4, '\u{0633}'), // seen
    (0xFEB5, 4, '\u{0634}'), // sheen
    (0xFEB9, 4, '\u{0635}'), // sad
    (0xFEBD, 4, '\u{0636}'), // dad
    (0xFEC1, 4, '\u{0637}'), // tah
    (0xFEC5, 4, '\u{0638}'), // zah
    (0xFEC9, 4, '\u{0639}'), // ain
    (0xFECD, 4, '\u{063A}'), // ghain
    (0xFED1, 4, '\u{0641}'), // feh
    (0xFED5, 4, '\u{0642}'), // qaf
    (0xFED9, 4, '\u{0643}'), // kaf
    (0xFEDD, 4, '\u{0644}'), // lam
    (0xFEE1, 4, '\u{0645}'), // meem
    (0xFEE5, 4, '\u{0646}'), // noon
    (0xFEE9, 4, '\u{0647}'), // heh
    (0xFEED, 2, '\u{0648}'), // waw
    (0xFEEF, 2, '\u{0649}'), // alef maksura
    (0xFEF1, 4, '\u{064A}'), // yeh
];

/// Lam-Alef ligatures (isolated, final) and the alef each one carries.
const LAM_ALEF_FORMS: &[(u32, char)] = &[
    (0xFEF5, '\u{0622}'),
    (0xFEF7, '\u{0623}'),
    (0xFEF9, '\u{0625}'),
    (0xFEFB, '\u{0627}'),
];

/// What a mapped glyph turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Canonical {
    Letter(char),
    /// Lam followed by the given alef.
    LamAlef(char),
    Elided,
}

static GLYPH_MAP: LazyLock<HashMap<char, Canonical>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(128);

    for &(first, shapes, letter) in LETTER_FORMS {
        for glyph in (first..first + shapes).filter_map(char::from_u32) {
            map.insert(glyph, Canonical::Letter(letter));
        }
    }

    for &(first, alef) in LAM_ALEF_FORMS {
        for glyph in (first..first + 2).filter_map(char::from_u32) {
            map.insert(glyph, Canonical::LamAlef(alef));
        }
    }

    map.insert(TATWEEL, Canonical::Elided);
    map
});

/// Fold presentation forms to canonical Arabic letters.
///
/// Total and pure: characters without a mapping (digits, Latin, punctuation,
/// letters that are already canonical) are copied through unchanged.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        match GLYPH_MAP.get(&ch) {
            Some(Canonical::Letter(letter)) => out.push(*letter),
            Some(Canonical::LamAlef(alef)) => {
                out.push(LAM);
                out.push(*alef);
            }
            Some(Canonical::Elided) => {}
            None => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes(first: u32, count: u32) -> Vec<char> {
        (first..first + count).filter_map(char::from_u32).collect()
    }

    #[test]
    fn four_positional_shapes_collapse_to_one_letter() {
        for &(first, count, letter) in LETTER_FORMS.iter().filter(|f| f.1 == 4) {
            for glyph in shapes(first, count) {
                assert_eq!(
                    normalize(&glyph.to_string()),
                    letter.to_string(),
                    "U+{:04X} should fold to U+{:04X}",
                    glyph as u32,
                    letter as u32
                );
            }
        }
    }

    #[test]
    fn beh_shapes_all_become_beh() {
        let folded: Vec<String> = ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}']
            .iter()
            .map(|c| normalize(&c.to_string()))
            .collect();
        assert!(folded.iter().all(|s| s == "\u{0628}"));
    }

    #[test]
    fn two_shape_letters_collapse() {
        assert_eq!(normalize("\u{FEAD}\u{FEAE}"), "\u{0631}\u{0631}");
        assert_eq!(normalize("\u{FE93}\u{FE94}"), "\u{0629}\u{0629}");
        assert_eq!(normalize("\u{FEEF}\u{FEF0}"), "\u{0649}\u{0649}");
    }

    #[test]
    fn table_covers_every_form_once() {
        let expected: u32 = LETTER_FORMS.iter().map(|f| f.1).sum::<u32>()
            + LAM_ALEF_FORMS.len() as u32 * 2
            + 1;
        assert_eq!(GLYPH_MAP.len() as u32, expected);
    }

    #[test]
    fn lam_alef_ligatures_expand_to_two_letters() {
        assert_eq!(normalize("\u{FEFB}"), "\u{0644}\u{0627}");
        assert_eq!(normalize("\u{FEFC}"), "\u{0644}\u{0627}");
        assert_eq!(normalize("\u{FEF5}"), "\u{0644}\u{0622}");
        assert_eq!(normalize("\u{FEF6}"), "\u{0644}\u{0622}");
        assert_eq!(normalize("\u{FEF7}"), "\u{0644}\u{0623}");
        assert_eq!(normalize("\u{FEF8}"), "\u{0644}\u{0623}");
        assert_eq!(normalize("\u{FEF9}"), "\u{0644}\u{0625}");
        assert_eq!(normalize("\u{FEFA}"), "\u{0644}\u{0625}");
    }

    #[test]
    fn tatweel_is_deleted() {
        // كـتـاب
        assert_eq!(
            normalize("\u{0643}\u{0640}\u{062A}\u{0640}\u{0627}\u{0628}"),
            "\u{0643}\u{062A}\u{0627}\u{0628}"
        );
        assert_eq!(normalize("\u{0640}\u{0640}"), "");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        let text = "Faculty 12.50 (A-B) / 2024";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn canonical_arabic_is_untouched() {
        let text = "\u{062C}\u{0627}\u{0645}\u{0639}\u{0629}";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "\u{FE9F}\u{FE8E}\u{FEE3}\u{FECC}\u{FE94}",
            "\u{FEDF}\u{FEFC}\u{FE8F} 15.75",
            "\u{0627}\u{0644}\u{0640}\u{0639}\u{0644}\u{0648}\u{0645}",
            "plain ascii",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn word_folds_letter_by_letter() {
        // ﺟﺎﻣﻌﺔ → جامعة
        assert_eq!(
            normalize("\u{FE9F}\u{FE8E}\u{FEE3}\u{FECC}\u{FE94}"),
            "\u{062C}\u{0627}\u{0645}\u{0639}\u{0629}"
        );
    }
}
