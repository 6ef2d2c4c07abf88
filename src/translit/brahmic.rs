//! The Brahmic-source engine: a per-codepoint stream translator.
//!
//! Vowel marks and the virama resolve through `marks`; everything else goes
//! through `letters`. When the target is Roman, a bare consonant owes its
//! inherent short-a, paid out before the next letter (or at end of input)
//! unless a mark or virama cancels it.

use super::map::{swap_pairs, CompiledMap};

pub fn transliterate_brahmic(data: &str, map: &CompiledMap) -> String {
    let data = match &map.reorder_input {
        Some(re) => swap_pairs(re, data),
        None => data.to_string(),
    };

    let mut out = String::with_capacity(data.len());
    let mut had_roman_consonant = false;
    let mut dangling_hash = false;
    let mut skipping_trans = false;
    let mut buf = [0u8; 4];

    for c in data.chars() {
        if c == '#' {
            if dangling_hash {
                skipping_trans = !skipping_trans;
                dangling_hash = false;
            } else {
                dangling_hash = true;
            }
            if had_roman_consonant {
                out.push_str(&map.to_scheme_a);
                had_roman_consonant = false;
            }
            continue;
        }
        if skipping_trans {
            out.push(c);
            continue;
        }
        let token: &str = c.encode_utf8(&mut buf);
        if let Some(mark) = map.marks.get(token) {
            out.push_str(mark);
            had_roman_consonant = false;
            continue;
        }
        if dangling_hash {
            out.push('#');
            dangling_hash = false;
        }
        if had_roman_consonant {
            out.push_str(&map.to_scheme_a);
            had_roman_consonant = false;
        }
        match map.letters.get(token) {
            Some(letter) => {
                out.push_str(letter);
                had_roman_consonant = map.to_roman && map.consonants.contains(token);
            }
            None => out.push(c),
        }
    }
    if had_roman_consonant {
        out.push_str(&map.to_scheme_a);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SchemeRegistry;
    use crate::translit::map::make_map;

    fn run(data: &str, from: &str, to: &str) -> String {
        let registry = SchemeRegistry::builtin();
        let map = make_map(&registry.get(from).unwrap(), &registry.get(to).unwrap());
        transliterate_brahmic(data, &map)
    }

    #[test]
    fn test_to_roman() {
        assert_eq!(run("नमः", "devanagari", "iast"), "namaḥ");
        assert_eq!(run("राम", "devanagari", "iast"), "rāma");
        assert_eq!(run("संस्कृतम्", "devanagari", "hk"), "saMskRtam");
        assert_eq!(run("धर्म", "devanagari", "slp1"), "Darma");
    }

    #[test]
    fn test_implicit_a_paid_at_end() {
        assert_eq!(run("क", "devanagari", "iast"), "ka");
        assert_eq!(run("क्", "devanagari", "iast"), "k");
    }

    #[test]
    fn test_to_brahmic() {
        assert_eq!(run("धर्म", "devanagari", "telugu"), "ధర్మ");
        assert_eq!(run("नमः", "devanagari", "bengali"), "নমঃ");
        assert_eq!(run("राम", "devanagari", "kannada"), "ರಾಮ");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(run("धर्म!", "devanagari", "iast"), "dharma!");
        assert_eq!(run("abc", "devanagari", "iast"), "abc");
    }

    #[test]
    fn test_dangling_hash_emitted() {
        assert_eq!(run("न#म", "devanagari", "iast"), "na#ma");
        assert_eq!(run("#", "devanagari", "iast"), "#");
    }

    #[test]
    fn test_double_hash_toggles() {
        assert_eq!(run("##नमः##", "devanagari", "iast"), "नमः");
        assert_eq!(run("न##म##न", "devanagari", "iast"), "naमna");
    }

    #[test]
    fn test_conjunct_decomposes_cleanly() {
        // क्ष arrives as क ् ष; the virama suppresses the implicit a.
        assert_eq!(run("क्षेत्र", "devanagari", "iast"), "kṣetra");
    }

    #[test]
    fn test_reorder_input_accents() {
        // Anusvara-then-accent in Devanagari becomes accent-then-anusvara
        // in the Roman output.
        assert_eq!(run("कं॑", "devanagari", "iast"), "ka\u{0301}ṃ");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run("", "devanagari", "iast"), "");
    }
}
