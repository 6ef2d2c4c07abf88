//! Transliteration between Sanskrit writing systems.
//!
//! Converts text between Brahmic abugidas (Devanagari, Bengali, Tamil, ...)
//! and Roman alphabetic encodings (IAST, Harvard-Kyoto, ITRANS, SLP1, ...).
//! Roman input goes through a longest-match tokenizer with implicit-vowel
//! tracking; Brahmic input is translated codepoint by codepoint with
//! vowel-mark/virama handling.

pub mod aksara;
pub mod detect;
pub mod scheme;
pub mod translit;
pub mod unicode;

pub use detect::detect;
pub use scheme::{Scheme, SchemeError};
pub use translit::{
    add_brahmic_scheme, add_roman_scheme, transliterate, transliterate_wordwise, Options,
    TranslitError, Transliterator,
};
