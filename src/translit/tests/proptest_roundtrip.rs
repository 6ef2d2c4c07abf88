//! Property tests for the transliteration core.
//!
//! Generates CV-structured Harvard-Kyoto words and verifies that the
//! HK → Devanagari → HK round trip is the identity, plus totality checks
//! on the detector.

use proptest::prelude::*;

use crate::detect::detect;
use crate::translit::{Options, Transliterator};

const CONSONANTS: &[&str] = &[
    "k", "kh", "g", "gh", "G", "c", "ch", "j", "jh", "J", "T", "Th", "D", "Dh", "N", "t", "th",
    "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l", "v", "z", "S", "s", "h", "L", "kS",
    "jJ",
];

const VOWELS: &[&str] = &[
    "a", "A", "i", "I", "u", "U", "R", "RR", "lR", "lRR", "e", "ai", "o", "au",
];

fn arb_syllable() -> impl Strategy<Value = String> {
    (
        prop::sample::select(CONSONANTS),
        prop::sample::select(VOWELS),
    )
        .prop_map(|(c, v)| format!("{c}{v}"))
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_syllable(), 1..6).prop_map(|syllables| syllables.concat())
}

proptest! {
    #[test]
    fn hk_devanagari_roundtrip_is_identity(word in arb_word()) {
        let mut tr = Transliterator::new();
        let deva = tr
            .transliterate(&word, "hk", "devanagari", &Options::default())
            .unwrap();
        let back = tr
            .transliterate(&deva, "devanagari", "hk", &Options::default())
            .unwrap();
        prop_assert_eq!(back, word);
    }

    #[test]
    fn detect_never_panics(text in "\\PC*") {
        let _ = detect(&text);
    }

    #[test]
    fn unknown_ascii_passes_through_unchanged(text in "[FQVWX0-9 ]*") {
        // None of these are HK tokens except digits; digit-free input
        // survives Roman tokenization verbatim.
        let mut tr = Transliterator::new();
        let out = tr
            .transliterate(&text, "hk", "iast", &Options::default())
            .unwrap();
        for c in ['F', 'Q', 'V', 'W', 'X', ' '] {
            prop_assert_eq!(
                out.matches(c).count(),
                text.matches(c).count()
            );
        }
    }
}
