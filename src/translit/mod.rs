//! Scheme-to-scheme transliteration: map compilation, engine dispatch, and
//! the per-pair rewrite passes around the engines.

pub(crate) mod brahmic;
pub(crate) mod map;
pub(crate) mod roman;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;
use tracing::{debug_span, warn};

use crate::aksara;
use crate::detect;
use crate::scheme::{Scheme, SchemeError, SchemeRegistry};

use map::CompiledMap;

#[derive(Debug, thiserror::Error)]
pub enum TranslitError {
    #[error("unknown scheme: {0:?}")]
    UnknownScheme(String),
    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

/// Per-call options.
///
/// `preferred_alternates` maps a target scheme name to literal substitutions
/// applied to the final output; both levels iterate in `BTreeMap` order, so
/// the substitution order is lexicographic and deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Pass `<...>` spans in Roman input through unchanged.
    pub skip_sgml: bool,
    /// Drop the virama on a word-final or unmatched-trailing consonant.
    pub syncope: bool,
    /// Word-wise mode joins syllables with TAB on both sides.
    pub split_aksara: bool,
    /// Enable the consonant-pull rule in word-wise rendering.
    pub move_consonant: bool,
    pub preferred_alternates: BTreeMap<String, BTreeMap<String, String>>,
}

struct CacheEntry {
    from: String,
    to: String,
    options: Options,
    map: Arc<CompiledMap>,
}

/// Owns the scheme registry and the single-slot compiled-map cache.
pub struct Transliterator {
    registry: SchemeRegistry,
    cache: Option<CacheEntry>,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    /// A transliterator preloaded with the built-in schemes.
    pub fn new() -> Self {
        Transliterator {
            registry: SchemeRegistry::builtin(),
            cache: None,
        }
    }

    pub fn scheme(&self, name: &str) -> Option<Arc<Scheme>> {
        self.registry.get(name)
    }

    /// Register a Brahmic scheme. Must happen before transliteration calls
    /// that use it; invalidates the compiled-map cache.
    pub fn add_brahmic_scheme(&mut self, name: &str, scheme: Scheme) {
        self.registry.add_brahmic(name, scheme);
        self.cache = None;
    }

    /// Register a Roman scheme, deriving `vowel_marks` from `vowels` when
    /// absent; invalidates the compiled-map cache.
    pub fn add_roman_scheme(&mut self, name: &str, scheme: Scheme) -> Result<(), SchemeError> {
        self.registry.add_roman(name, scheme)?;
        self.cache = None;
        Ok(())
    }

    /// Transliterate `data` from one scheme to another. An empty `from`
    /// auto-detects the scheme.
    pub fn transliterate(
        &mut self,
        data: &str,
        from: &str,
        to: &str,
        options: &Options,
    ) -> Result<String, TranslitError> {
        let from = if from.is_empty() {
            detect::detect(data).to_lowercase()
        } else {
            from.to_string()
        };
        let _span = debug_span!("transliterate", from = %from, to, len = data.len()).entered();

        let from_scheme = self
            .registry
            .get(&from)
            .ok_or_else(|| TranslitError::UnknownScheme(from.clone()))?;
        let to_scheme = self
            .registry
            .get(to)
            .ok_or_else(|| TranslitError::UnknownScheme(to.to_string()))?;
        let map = self.compiled_map(&from, to, options, &from_scheme, &to_scheme);

        let mut data = preprocess(data, &from, to);
        for (key, shortcut) in from_scheme.shortcuts() {
            // Canonicalize shortened forms into their long keys before
            // tokenization; a shortcut inside its own key is normalized
            // first so the expansion cannot double up.
            if key.contains(shortcut.as_str()) {
                data = data.replace(key, shortcut);
            }
            data = data.replace(shortcut, key);
        }

        let mut out = if map.from_roman {
            roman::transliterate_roman(&data, &map, options)
        } else {
            brahmic::transliterate_brahmic(&data, &map)
        };

        for (key, shortcut) in to_scheme.shortcuts() {
            if shortcut.contains(key.as_str()) {
                out = out.replace(shortcut, key);
            }
            out = out.replace(key, shortcut);
        }
        if to == "tamil_superscripted" {
            out = RE_SUPERSCRIPT_BEFORE_MARKS.replace_all(&out, "$2$1").into_owned();
        }
        if let Some(substitutions) = options.preferred_alternates.get(to) {
            for (literal, replacement) in substitutions {
                out = out.replace(literal, replacement);
            }
        }
        Ok(out)
    }

    /// Transliterate word by word, returning `(original, result)` pairs.
    ///
    /// With `split_aksara` (or when audio markers are present) each word is
    /// syllabified and the syllables are transliterated independently;
    /// `split_aksara` additionally joins both sides with TAB.
    pub fn transliterate_wordwise(
        &mut self,
        data: &str,
        from: &str,
        to: &str,
        options: &Options,
    ) -> Result<Vec<(String, String)>, TranslitError> {
        // Resolve auto-detection once, on the whole input; a lone syllable
        // or marker would detect differently than the text it came from.
        let from = if from.is_empty() {
            detect::detect(data).to_lowercase()
        } else {
            from.to_string()
        };
        let from = from.as_str();
        let has_audio = data.contains(aksara::AUDIO_MARKER);
        let data = if has_audio {
            let glued = RE_PUNCT_BEFORE_MARKER.replace_all(data, "$1$2").into_owned();
            RE_MARKER_BEFORE_DASH.replace_all(&glued, "$1-").into_owned()
        } else {
            data.to_string()
        };

        let mut results = Vec::new();
        for word in data.split_whitespace() {
            if word.is_empty() {
                continue;
            }
            if options.split_aksara || has_audio {
                let mut syllables = aksara::split_aksara(word);
                aksara::merge_trailing_consonant(&mut syllables);
                let mut sy2 = syllables.clone();
                aksara::combine_adjacent_consonants(
                    &mut syllables,
                    &mut sy2,
                    options.move_consonant,
                );
                let mut rendered = Vec::with_capacity(sy2.len());
                for syllable in &sy2 {
                    rendered.push(self.transliterate(syllable, from, to, options)?);
                }
                let joiner = if options.split_aksara { "\t" } else { "" };
                results.push((syllables.join(joiner), rendered.join(joiner)));
            } else {
                let rendered = self.transliterate(word, from, to, options)?;
                results.push((word.to_string(), rendered));
            }
        }
        Ok(results)
    }

    fn compiled_map(
        &mut self,
        from: &str,
        to: &str,
        options: &Options,
        from_scheme: &Scheme,
        to_scheme: &Scheme,
    ) -> Arc<CompiledMap> {
        if let Some(entry) = &self.cache {
            if entry.from == from && entry.to == to && entry.options == *options {
                return Arc::clone(&entry.map);
            }
        }
        let map = Arc::new(map::make_map(from_scheme, to_scheme));
        self.cache = Some(CacheEntry {
            from: from.to_string(),
            to: to.to_string(),
            options: options.clone(),
            map: Arc::clone(&map),
        });
        map
    }
}

static RE_ITRANS_CANDRABINDU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\\m\+\}").unwrap());
static RE_ITRANS_DOT_H: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.h").unwrap());
static RE_ITRANS_BACKSLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([^'`_])").unwrap());

/// Tamil vowel marks, virama and the Vedic accents: the run a superscript
/// digit moves across in tamil_superscripted text.
const TAMIL_MARK_RUN: &str = "ாிீுூெேைொோௌ்॒॑";

static RE_SUPERSCRIPT_AFTER_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("([{TAMIL_MARK_RUN}]+)([²³⁴])")).unwrap());
static RE_SUPERSCRIPT_BEFORE_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("([²³⁴])([{TAMIL_MARK_RUN}]+)")).unwrap());

static RE_PUNCT_BEFORE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([|।॥\d.,!?:-]+)\s+(▷)").unwrap());
static RE_MARKER_BEFORE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(▷)\s+-").unwrap());

/// Per-pair input rewrites that run before tokenization.
fn preprocess(data: &str, from: &str, to: &str) -> String {
    match from {
        "itrans" => {
            // {\m+} is the ITRANS candrabindu; the .h placeholder it expands
            // through is dropped everywhere else.
            let data = RE_ITRANS_CANDRABINDU.replace_all(data, ".h.N");
            let data = RE_ITRANS_DOT_H.replace_all(&data, "");
            RE_ITRANS_BACKSLASH.replace_all(&data, "##$1##").into_owned()
        }
        "tamil_superscripted" => {
            warn!("transliteration from tamil_superscripted is not fully implemented");
            RE_SUPERSCRIPT_AFTER_MARKS.replace_all(data, "$2$1").into_owned()
        }
        "iast" if to == "devanagari" => iast_to_devanagari_rewrites(data),
        _ => data.to_string(),
    }
}

/// IAST input headed for Devanagari: normalize curly apostrophes to the
/// avagraha spelling, protect decimal points from the danda rewrite, strip
/// hyphenation, and turn clause punctuation into dandas.
fn iast_to_devanagari_rewrites(data: &str) -> String {
    let data = data.replace(['\u{2018}', '\u{2019}'], "'");

    let chars: Vec<char> = data.chars().collect();
    let mut out = String::with_capacity(data.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '.' if i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit() =>
            {
                out.push_str("##.##");
            }
            '-' => {}
            ',' | '?' | '!' | ':' if i == 0 || (chars[i - 1] != '#' && chars[i - 1] != '\\') => {
                out.push('|');
            }
            _ => out.push(c),
        }
    }
    out
}

static GLOBAL: LazyLock<Mutex<Transliterator>> =
    LazyLock::new(|| Mutex::new(Transliterator::new()));

/// Transliterate with the process-wide default [`Transliterator`].
pub fn transliterate(
    data: &str,
    from: &str,
    to: &str,
    options: &Options,
) -> Result<String, TranslitError> {
    GLOBAL
        .lock()
        .expect("default transliterator poisoned")
        .transliterate(data, from, to, options)
}

/// Word-wise transliteration with the process-wide default instance.
pub fn transliterate_wordwise(
    data: &str,
    from: &str,
    to: &str,
    options: &Options,
) -> Result<Vec<(String, String)>, TranslitError> {
    GLOBAL
        .lock()
        .expect("default transliterator poisoned")
        .transliterate_wordwise(data, from, to, options)
}

/// Register a Brahmic scheme on the process-wide default instance.
pub fn add_brahmic_scheme(name: &str, scheme: Scheme) {
    GLOBAL
        .lock()
        .expect("default transliterator poisoned")
        .add_brahmic_scheme(name, scheme);
}

/// Register a Roman scheme on the process-wide default instance.
pub fn add_roman_scheme(name: &str, scheme: Scheme) -> Result<(), SchemeError> {
    GLOBAL
        .lock()
        .expect("default transliterator poisoned")
        .add_roman_scheme(name, scheme)
}
