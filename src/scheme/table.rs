//! Embedded built-in scheme tables.

pub(crate) const BUILTIN_SCHEMES: &[(&str, &str)] = &[
    ("bengali", include_str!("data/bengali.toml")),
    ("devanagari", include_str!("data/devanagari.toml")),
    ("gujarati", include_str!("data/gujarati.toml")),
    ("gurmukhi", include_str!("data/gurmukhi.toml")),
    ("hk", include_str!("data/hk.toml")),
    ("iast", include_str!("data/iast.toml")),
    ("itrans", include_str!("data/itrans.toml")),
    ("kannada", include_str!("data/kannada.toml")),
    ("kolkata", include_str!("data/kolkata.toml")),
    ("malayalam", include_str!("data/malayalam.toml")),
    ("oriya", include_str!("data/oriya.toml")),
    ("slp1", include_str!("data/slp1.toml")),
    ("tamil", include_str!("data/tamil.toml")),
    ("tamil_superscripted", include_str!("data/tamil_superscripted.toml")),
    ("telugu", include_str!("data/telugu.toml")),
    ("velthuis", include_str!("data/velthuis.toml")),
];
