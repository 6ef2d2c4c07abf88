//! Compilation of a (from, to) scheme pair into the routing table the
//! engines run on.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::warn;

use crate::scheme::{base_vowel_of, Scheme};

/// Groups that carry metadata rather than letter tables never reach the
/// compiled map; they are modeled as separate `Scheme` fields, so the group
/// iteration below only ever sees letter groups.
///
/// Empty renderings are preserved verbatim in these groups; elsewhere an
/// empty target rendering falls back to the source rendering.
const EMPTY_PRESERVING_GROUPS: &[&str] = &["virama", "zwj", "skip"];

/// The routing table for one (from, to) pair.
#[derive(Debug, Default)]
pub struct CompiledMap {
    /// Source token → target rendering, for standalone letters.
    pub letters: HashMap<String, String>,
    /// Source token → target rendering used after a consonant (vowel marks
    /// and virama).
    pub marks: HashMap<String, String>,
    /// Source tokens that are consonants.
    pub consonants: HashSet<String>,
    /// Source accent → target accent.
    pub accents: HashMap<String, String>,
    /// Longest source token, in chars.
    pub max_token_len: usize,
    pub from_roman: bool,
    pub to_roman: bool,
    /// Target rendering of the virama.
    pub virama: String,
    /// Short-a rendering in the source scheme.
    pub from_scheme_a: String,
    /// Short-a rendering in the target scheme.
    pub to_scheme_a: String,
    /// Rewrites `(yogavaaha)(accent)` → `(accent)(yogavaaha)` on Brahmic
    /// input headed for a Roman target.
    pub reorder_input: Option<Regex>,
    /// Rewrites `(accent)(yogavaaha)` → `(yogavaaha)(accent)` on Brahmic
    /// output produced from a Roman source.
    pub reorder_output: Option<Regex>,
}

pub fn make_map(from: &Scheme, to: &Scheme) -> CompiledMap {
    let mut map = CompiledMap {
        from_roman: from.is_roman(),
        to_roman: to.is_roman(),
        ..Default::default()
    };
    let mut source_yogavaahas = Vec::new();
    let mut target_yogavaahas = Vec::new();

    for (group, from_table) in from.groups() {
        let Some(to_table) = to.group(group) else {
            continue;
        };
        let preserve_empty = EMPTY_PRESERVING_GROUPS.contains(&group.as_str());
        for (key, f) in from_table {
            let mut t = to_table.get(key).cloned().unwrap_or_default();
            if t.is_empty() && !preserve_empty {
                t = f.clone();
            }
            match group.as_str() {
                "vowel_marks" | "virama" => {
                    map.note_token(f);
                    map.marks.insert(f.clone(), t.clone());
                    for alt in from.alternates_of(f) {
                        map.note_token(alt);
                        map.marks.insert(alt.clone(), t.clone());
                    }
                }
                "accents" => {
                    map.accents.insert(f.clone(), t.clone());
                    map.insert_letter(from, f, &t);
                }
                "consonants" | "extra_consonants" => {
                    map.consonants.insert(f.clone());
                    for alt in from.alternates_of(f) {
                        map.consonants.insert(alt.clone());
                    }
                    map.insert_letter(from, f, &t);
                }
                _ => {
                    map.insert_letter(from, f, &t);
                }
            }
            match group.as_str() {
                "virama" if key == "्" => map.virama = t.clone(),
                "vowels" if key == "अ" => {
                    map.from_scheme_a = f.clone();
                    map.to_scheme_a = t.clone();
                }
                "yogavaahas" => {
                    source_yogavaahas.push(f.clone());
                    target_yogavaahas.push(t.clone());
                }
                _ => {}
            }
        }
    }

    apply_accented_alternates(&mut map, from);

    if !map.accents.is_empty() {
        if !map.from_roman && map.to_roman {
            let yoga = char_class(&source_yogavaahas);
            let accent = char_class(map.accents.keys());
            map.reorder_input = swap_regex(&yoga, &accent);
        }
        if map.from_roman && !map.to_roman {
            let accent = char_class(map.accents.values());
            let yoga = char_class(&target_yogavaahas);
            map.reorder_output = swap_regex(&accent, &yoga);
        }
    }

    map
}

impl CompiledMap {
    fn insert_letter(&mut self, from: &Scheme, f: &str, t: &str) {
        self.note_token(f);
        self.letters.insert(f.to_string(), t.to_string());
        for alt in from.alternates_of(f) {
            self.note_token(alt);
            self.letters.insert(alt.clone(), t.to_string());
        }
    }

    fn note_token(&mut self, token: &str) {
        self.max_token_len = self.max_token_len.max(token.chars().count());
    }
}

/// Expand the source scheme's accented-vowel alternates: each synonym maps
/// to the base vowel's rendering plus the translated accent.
fn apply_accented_alternates(map: &mut CompiledMap, from: &Scheme) {
    for (key, synonyms) in from.accented_vowel_alternates() {
        let base = base_vowel_of(key);
        let accent = &key[base.len()..];
        let Some(base_letter) = map.letters.get(base).cloned() else {
            warn!(key = %key, "accented vowel alternate has no base vowel in map; skipping");
            continue;
        };
        let target_accent = map
            .accents
            .get(accent)
            .cloned()
            .unwrap_or_else(|| accent.to_string());
        let base_mark = map.marks.get(base).cloned().unwrap_or_default();
        for synonym in synonyms {
            map.note_token(synonym);
            map.marks
                .insert(synonym.clone(), format!("{base_mark}{target_accent}"));
            map.letters
                .insert(synonym.clone(), format!("{base_letter}{target_accent}"));
        }
    }
}

/// Build a regex character class from single-codepoint renderings.
/// Multi-codepoint renderings cannot live in a class and are skipped.
fn char_class<I, S>(renderings: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut class = String::new();
    for r in renderings {
        let r = r.as_ref();
        if r.chars().count() == 1 {
            class.push_str(&regex::escape(r));
        }
    }
    class
}

fn swap_regex(first: &str, second: &str) -> Option<Regex> {
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Regex::new(&format!("([{first}])([{second}])")).ok()
}

/// Apply a swap regex produced by [`swap_regex`], exchanging the two
/// captured characters.
pub fn swap_pairs(re: &Regex, text: &str) -> String {
    re.replace_all(text, "$2$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SchemeRegistry;

    fn compiled(from: &str, to: &str) -> CompiledMap {
        let registry = SchemeRegistry::builtin();
        make_map(&registry.get(from).unwrap(), &registry.get(to).unwrap())
    }

    #[test]
    fn test_hk_to_devanagari() {
        let map = compiled("hk", "devanagari");
        assert!(map.from_roman);
        assert!(!map.to_roman);
        assert_eq!(map.letters.get("k").map(String::as_str), Some("क"));
        assert_eq!(map.letters.get("A").map(String::as_str), Some("आ"));
        assert_eq!(map.marks.get("A").map(String::as_str), Some("ा"));
        assert_eq!(map.virama, "्");
        assert_eq!(map.from_scheme_a, "a");
        assert_eq!(map.to_scheme_a, "अ");
        assert!(map.consonants.contains("k"));
        assert!(map.consonants.contains("jJ"));
        assert!(!map.consonants.contains("a"));
    }

    #[test]
    fn test_max_token_len() {
        // lRR is the longest HK token.
        assert_eq!(compiled("hk", "devanagari").max_token_len, 3);
        // R^i and friends keep ITRANS at three as well.
        assert_eq!(compiled("itrans", "devanagari").max_token_len, 3);
    }

    #[test]
    fn test_marks_only_hold_marks_and_virama() {
        let map = compiled("hk", "devanagari");
        assert!(map.marks.contains_key("A"));
        assert!(!map.marks.contains_key("k"));
        // The standalone vowel form lives in letters.
        assert!(map.letters.contains_key("A"));
    }

    #[test]
    fn test_alternates_expand() {
        let map = compiled("itrans", "devanagari");
        assert_eq!(map.letters.get("aa").map(String::as_str), Some("आ"));
        assert_eq!(map.marks.get("aa").map(String::as_str), Some("ा"));
        assert_eq!(map.letters.get("w").map(String::as_str), Some("व"));
        assert!(map.consonants.contains("w"));
        assert_eq!(map.letters.get("x").map(String::as_str), Some("क्ष"));
    }

    #[test]
    fn test_brahmic_to_roman_virama_is_empty() {
        let map = compiled("devanagari", "iast");
        assert_eq!(map.marks.get("्").map(String::as_str), Some(""));
        assert_eq!(map.letters.get("क").map(String::as_str), Some("k"));
        assert_eq!(map.marks.get("ा").map(String::as_str), Some("ā"));
        assert_eq!(map.to_scheme_a, "a");
    }

    #[test]
    fn test_missing_target_key_falls_back_to_source() {
        // Bengali has no ळ; the Devanagari rendering passes through.
        let map = compiled("devanagari", "bengali");
        assert_eq!(map.letters.get("ळ").map(String::as_str), Some("ळ"));
    }

    #[test]
    fn test_accented_alternates() {
        let map = compiled("iast", "devanagari");
        // Precomposed á maps to अ plus the target udatta accent.
        assert_eq!(map.letters.get("á").map(String::as_str), Some("अ॑"));
        // As a mark, the bare accent attaches to the implicit vowel.
        assert_eq!(map.marks.get("á").map(String::as_str), Some("॑"));
        assert_eq!(map.letters.get("ú").map(String::as_str), Some("उ॑"));
        assert_eq!(map.marks.get("ú").map(String::as_str), Some("ु॑"));
    }

    #[test]
    fn test_reorder_regexes_only_cross_family() {
        assert!(compiled("iast", "devanagari").reorder_output.is_some());
        assert!(compiled("devanagari", "iast").reorder_input.is_some());
        assert!(compiled("devanagari", "telugu").reorder_input.is_none());
        assert!(compiled("devanagari", "telugu").reorder_output.is_none());
        assert!(compiled("hk", "devanagari").reorder_output.is_none()); // hk has no accents
    }

    #[test]
    fn test_swap_pairs() {
        let re = Regex::new("([ab])([xy])").unwrap();
        assert_eq!(swap_pairs(&re, "ax by"), "xa yb");
        assert_eq!(swap_pairs(&re, "plain"), "plain");
    }
}
