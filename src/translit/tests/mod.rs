//! Cross-module transliteration scenarios.

mod proptest_roundtrip;

use crate::translit::{Options, Transliterator};

fn t(data: &str, from: &str, to: &str) -> String {
    Transliterator::new()
        .transliterate(data, from, to, &Options::default())
        .unwrap()
}

fn t_opts(data: &str, from: &str, to: &str, options: &Options) -> String {
    Transliterator::new()
        .transliterate(data, from, to, options)
        .unwrap()
}
