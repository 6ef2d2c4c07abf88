//! TOML scheme definitions.
//!
//! A scheme document carries an `is_roman` flag, the optional metadata
//! tables (`alternates`, `accented_vowel_alternates`, `shortcuts`) and any
//! number of group tables keyed by canonical Devanagari forms:
//!
//! ```toml
//! is_roman = true
//!
//! [vowels]
//! "अ" = "a"
//! "आ" = "A"
//!
//! [alternates]
//! "A" = ["aa"]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::Scheme;

#[derive(Deserialize)]
struct SchemeConfig {
    #[serde(default)]
    is_roman: bool,
    #[serde(default)]
    alternates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    accented_vowel_alternates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    shortcuts: Vec<(String, String)>,
    #[serde(flatten)]
    groups: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("scheme defines no groups")]
    Empty,
    #[error("group {group:?} has an empty key")]
    EmptyKey { group: String },
}

/// Parse TOML text into a [`Scheme`].
pub fn parse_scheme_toml(toml_str: &str) -> Result<Scheme, SchemeConfigError> {
    let config: SchemeConfig =
        toml::from_str(toml_str).map_err(|e| SchemeConfigError::Parse(e.to_string()))?;

    if config.groups.is_empty() {
        return Err(SchemeConfigError::Empty);
    }
    for (group, table) in &config.groups {
        // The skip group legitimately carries an empty key; everywhere else
        // an empty key can never be matched and marks a broken table.
        if group != "skip" && table.keys().any(String::is_empty) {
            return Err(SchemeConfigError::EmptyKey {
                group: group.clone(),
            });
        }
    }

    Ok(Scheme {
        is_roman: config.is_roman,
        groups: config.groups,
        alternates: config.alternates,
        accented_vowel_alternates: config.accented_vowel_alternates,
        shortcuts: config.shortcuts,
    })
}
