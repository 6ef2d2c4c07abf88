//! Scheme auto-detection.
//!
//! Brahmic scripts are identified from their Unicode block; Roman encodings
//! fall through a cascade of discriminating regexes ordered from most to
//! least specific. The function is total: anything unrecognized is HK.

use std::sync::LazyLock;

use regex::Regex;

use crate::unicode;

/// Characters that only IAST or kolkata use.
static RE_IAST_OR_KOLKATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[āīūṛṝḷḹēōṃḥṅñṭḍṇśṣḻ]").unwrap());

/// Long e/o distinguish kolkata from IAST.
static RE_KOLKATA_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ēō]").unwrap());

static RE_ITRANS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ee|oo|\^[iI]|RR[iI]|L[iI]|~N|N\^|Ch|chh|JN|sh|Sh|\.a").unwrap());

static RE_SLP1_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[fFxXEOCYwWqQPB]|kz|N[kg]|tT|dD|S[cn]|[aAiIuUfFxXeEoO]R|G[yr]|(?:\W|^)G").unwrap()
});

static RE_VELTHUIS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\.[mhnrltds]|"n|~s"#).unwrap());

/// Doubled vowels and ~n are shared by ITRANS and Velthuis; ITRANS wins.
static RE_ITRANS_OR_VELTHUIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"aa|ii|uu|~n").unwrap());

/// Detect the scheme of `text`. Returns a display name ("Devanagari",
/// "IAST", ...); callers that feed the transliterator lower-case it.
pub fn detect(text: &str) -> &'static str {
    for c in text.chars() {
        if let Some(block) = unicode::brahmic_block(c) {
            return block;
        }
    }
    if RE_IAST_OR_KOLKATA.is_match(text) {
        if RE_KOLKATA_ONLY.is_match(text) {
            return "Kolkata";
        }
        return "IAST";
    }
    if RE_ITRANS_ONLY.is_match(text) {
        return "ITRANS";
    }
    if RE_SLP1_ONLY.is_match(text) {
        return "SLP1";
    }
    if RE_VELTHUIS_ONLY.is_match(text) {
        return "Velthuis";
    }
    if RE_ITRANS_OR_VELTHUIS.is_match(text) {
        return "ITRANS";
    }
    "HK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brahmic_blocks() {
        assert_eq!(detect("धर्म"), "Devanagari");
        assert_eq!(detect("ধর্ম"), "Bengali");
        assert_eq!(detect("தமிழ்"), "Tamil");
        assert_eq!(detect("ధర్మ"), "Telugu");
        assert_eq!(detect("ಧರ್ಮ"), "Kannada");
        assert_eq!(detect("ധര്മ"), "Malayalam");
        assert_eq!(detect("ଧର୍ମ"), "Oriya");
        assert_eq!(detect("ધર્મ"), "Gujarati");
        assert_eq!(detect("ਧਰਮ"), "Gurmukhi");
    }

    #[test]
    fn test_brahmic_wins_over_roman() {
        // A single Brahmic codepoint decides, whatever else is present.
        assert_eq!(detect("dharma ध"), "Devanagari");
    }

    #[test]
    fn test_iast_vs_kolkata() {
        assert_eq!(detect("dharmaḥ"), "IAST");
        assert_eq!(detect("śṛṇoti"), "IAST");
        assert_eq!(detect("dēva"), "Kolkata");
    }

    #[test]
    fn test_itrans() {
        assert_eq!(detect(".a"), "ITRANS");
        assert_eq!(detect("shiva"), "ITRANS");
        assert_eq!(detect("RRi"), "ITRANS");
        // Doubled vowels without other markers still resolve to ITRANS.
        assert_eq!(detect("raama"), "ITRANS");
    }

    #[test]
    fn test_slp1() {
        assert_eq!(detect("kfzRa"), "SLP1");
        assert_eq!(detect("yogakzema"), "SLP1");
        assert_eq!(detect("Gawa"), "SLP1");
    }

    #[test]
    fn test_velthuis() {
        assert_eq!(detect(".rtam"), "Velthuis");
        assert_eq!(detect("du.hkha"), "Velthuis");
    }

    #[test]
    fn test_hk_fallback() {
        assert_eq!(detect("dharma"), "HK");
        assert_eq!(detect("namaH"), "HK");
        assert_eq!(detect(""), "HK");
        assert_eq!(detect("12345"), "HK");
    }
}
