//! Codepoint-level classification for Brahmic scripts.

/// First codepoint of the contiguous run of Brahmic blocks we recognize
/// (Devanagari through Malayalam).
pub const BRAHMIC_FIRST: u32 = 0x0900;
/// Last codepoint of that run.
pub const BRAHMIC_LAST: u32 = 0x0D7F;

/// Block starts in descending order, paired with the scheme display name.
/// Each block spans from its start to the next block's start; the check is
/// block-level, so a few unassigned codepoints inside a block also match,
/// which never matters for real text.
const BLOCKS: &[(u32, &str)] = &[
    (0x0D00, "Malayalam"),
    (0x0C80, "Kannada"),
    (0x0C00, "Telugu"),
    (0x0B80, "Tamil"),
    (0x0B00, "Oriya"),
    (0x0A80, "Gujarati"),
    (0x0A00, "Gurmukhi"),
    (0x0980, "Bengali"),
    (0x0900, "Devanagari"),
];

pub fn is_brahmic(c: char) -> bool {
    (BRAHMIC_FIRST..=BRAHMIC_LAST).contains(&(c as u32))
}

/// Name of the Brahmic block containing `c`, i.e. the highest named block
/// start at or below the codepoint. `None` outside the Brahmic range.
pub fn brahmic_block(c: char) -> Option<&'static str> {
    if !is_brahmic(c) {
        return None;
    }
    let code = c as u32;
    BLOCKS
        .iter()
        .find(|(start, _)| *start <= code)
        .map(|(_, name)| *name)
}
