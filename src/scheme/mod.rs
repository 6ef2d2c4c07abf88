//! Scheme definitions and the process-wide scheme registry.
//!
//! A scheme maps group names (`vowels`, `consonants`, `virama`, ...) to
//! tables keyed by canonical Devanagari forms. Built-in schemes are embedded
//! TOML documents; callers can register additional schemes at startup.

mod config;
mod table;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use config::{parse_scheme_toml, SchemeConfigError};

/// Devanagari vowel → dependent vowel mark, used to derive a Roman scheme's
/// `vowel_marks` group from its `vowels` group. `अ` has no mark and is
/// skipped.
const VOWEL_TO_MARK: &[(&str, &str)] = &[
    ("आ", "ा"),
    ("इ", "ि"),
    ("ई", "ी"),
    ("उ", "ु"),
    ("ऊ", "ू"),
    ("ऋ", "ृ"),
    ("ॠ", "ॄ"),
    ("ऌ", "ॢ"),
    ("ॡ", "ॣ"),
    ("ऎ", "ॆ"),
    ("ए", "े"),
    ("ऐ", "ै"),
    ("ऒ", "ॊ"),
    ("ओ", "ो"),
    ("औ", "ौ"),
];

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("roman scheme {0:?} has no rendering for the short-a vowel")]
    MissingShortA(String),
    #[error("scheme {scheme:?}: accented vowel alternate {key:?} has no base vowel")]
    MissingAccentBase { scheme: String, key: String },
}

/// A named writing system: group tables plus side metadata.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    is_roman: bool,
    groups: BTreeMap<String, BTreeMap<String, String>>,
    alternates: BTreeMap<String, Vec<String>>,
    accented_vowel_alternates: BTreeMap<String, Vec<String>>,
    shortcuts: Vec<(String, String)>,
}

impl Scheme {
    pub fn new(is_roman: bool) -> Self {
        Scheme {
            is_roman,
            ..Default::default()
        }
    }

    /// Parse a scheme from its TOML definition.
    pub fn from_toml(toml_str: &str) -> Result<Self, SchemeConfigError> {
        parse_scheme_toml(toml_str)
    }

    pub fn is_roman(&self) -> bool {
        self.is_roman
    }

    pub fn groups(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.groups.get(name)
    }

    /// Rendering of a canonical key within a group, if present.
    pub fn rendering(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }

    pub fn alternates_of(&self, rendering: &str) -> &[String] {
        self.alternates
            .get(rendering)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn accented_vowel_alternates(&self) -> &BTreeMap<String, Vec<String>> {
        &self.accented_vowel_alternates
    }

    pub fn shortcuts(&self) -> &[(String, String)] {
        &self.shortcuts
    }

    pub fn set_group(&mut self, name: &str, pairs: &[(&str, &str)]) {
        let table = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.groups.insert(name.to_string(), table);
    }

    pub fn set_alternates(&mut self, rendering: &str, alts: &[&str]) {
        self.alternates.insert(
            rendering.to_string(),
            alts.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn set_accented_vowel_alternates(&mut self, key: &str, alts: &[&str]) {
        self.accented_vowel_alternates.insert(
            key.to_string(),
            alts.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn set_shortcuts(&mut self, shortcuts: &[(&str, &str)]) {
        self.shortcuts = shortcuts
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    pub(crate) fn set_is_roman(&mut self, is_roman: bool) {
        self.is_roman = is_roman;
    }

    /// All renderings a Roman vowel can take, canonical and alternate.
    fn vowel_renderings(&self) -> Vec<&str> {
        let mut out = Vec::new();
        if let Some(vowels) = self.groups.get("vowels") {
            for rendering in vowels.values() {
                out.push(rendering.as_str());
                for alt in self.alternates_of(rendering) {
                    out.push(alt.as_str());
                }
            }
        }
        out
    }
}

/// Registered schemes, keyed by name. Built-ins are all lower-case.
#[derive(Debug, Clone)]
pub struct SchemeRegistry {
    schemes: BTreeMap<String, Arc<Scheme>>,
}

impl SchemeRegistry {
    /// Registry preloaded with the embedded built-in schemes.
    pub fn builtin() -> Self {
        let mut registry = SchemeRegistry {
            schemes: BTreeMap::new(),
        };
        for (name, toml_str) in table::BUILTIN_SCHEMES {
            let scheme = Scheme::from_toml(toml_str).expect("embedded scheme TOML must be valid");
            if scheme.is_roman() {
                registry
                    .add_roman(name, scheme)
                    .expect("embedded roman scheme must be well-formed");
            } else {
                registry.add_brahmic(name, scheme);
            }
        }
        registry
    }

    pub fn empty() -> Self {
        SchemeRegistry {
            schemes: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Scheme>> {
        self.schemes.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    pub fn add_brahmic(&mut self, name: &str, mut scheme: Scheme) {
        scheme.set_is_roman(false);
        self.schemes.insert(name.to_string(), Arc::new(scheme));
    }

    /// Register a Roman scheme, deriving `vowel_marks` from `vowels` when
    /// absent and validating the accented-vowel alternates.
    pub fn add_roman(&mut self, name: &str, mut scheme: Scheme) -> Result<(), SchemeError> {
        scheme.set_is_roman(true);
        let vowels = scheme.group("vowels").cloned().unwrap_or_default();
        if !vowels.contains_key("अ") {
            return Err(SchemeError::MissingShortA(name.to_string()));
        }
        {
            let known: Vec<String> = scheme
                .vowel_renderings()
                .into_iter()
                .map(str::to_string)
                .collect();
            for key in scheme.accented_vowel_alternates.keys() {
                let base = base_vowel_of(key);
                if !known.iter().any(|v| v == base) {
                    return Err(SchemeError::MissingAccentBase {
                        scheme: name.to_string(),
                        key: key.clone(),
                    });
                }
            }
        }
        if !scheme.groups.contains_key("vowel_marks") {
            let mut marks = BTreeMap::new();
            for (vowel_key, mark_key) in VOWEL_TO_MARK {
                if let Some(rendering) = vowels.get(*vowel_key) {
                    marks.insert(mark_key.to_string(), rendering.clone());
                }
            }
            scheme.groups.insert("vowel_marks".to_string(), marks);
        }
        self.schemes.insert(name.to_string(), Arc::new(scheme));
        Ok(())
    }
}

/// The accented-key convention: one trailing accent character, the rest is
/// the plain vowel.
pub(crate) fn base_vowel_of(key: &str) -> &str {
    match key.char_indices().next_back() {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}
