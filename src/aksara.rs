//! Aksara (syllable) analysis for Roman-script words.
//!
//! A word splits into syllables ending in a vowel group (plus optional
//! anusvara/visarga), a possible trailing consonant cluster, and
//! punctuation/number/audio-marker runs. Word-wise rendering uses the split
//! to transliterate syllable by syllable, with a consonant-migration pass
//! keeping the display split and the phonetic split in parallel lists.

use std::sync::LazyLock;

use regex::Regex;

/// Marks a clickable audio link in the source corpus; preserved through
/// syllabification and transliteration.
pub const AUDIO_MARKER: char = '▷';

/// Punctuation, danda/number runs and audio markers that separate the
/// alphabetic fragments of a word.
static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[▷,?!:]|\|+\d[|\d.\-]*|\|+|\d[\d.\-]*").unwrap());

/// A vowel group with its optional trailing anusvara/visarga.
static RE_VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[aiuāīūṛṝḷḹáíúeēèoōò]+[ṃḥ]?").unwrap());

static RE_VOWEL_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[aiuāīūṛṝḷḹáíúeēèoōò]").unwrap());

/// One consonant token, compounds first.
static RE_CONSONANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("kṣ|jñ|ll|[kgcjṭḍtdpb]h?|[ṅñṇnmyrlvśṣsh]").unwrap());

static RE_CONSONANT_AT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(?:kṣ|jñ|ll|[kgcjṭḍtdpb]h?|[ṅñṇnmyrlvśṣsh])").unwrap());

static RE_SINGLE_CONSONANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[kgcjṭḍtdpbṅñṇnmyrlvśṣsh]$").unwrap());

/// Consonants the optional pull rule may move across a syllable boundary.
static RE_MOVABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[ṅñṇnmrśṣsh]$").unwrap());

/// Number to glue audio numbers onto: a digit followed by digits/letters.
static RE_AUDIO_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"▷(\d[\da-z]*)?").unwrap());

/// Split a Roman word into syllables, trailing consonant clusters, and
/// punctuation/number/marker runs.
pub fn split_aksara(word: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut last = 0;
    for m in RE_SEPARATOR.find_iter(word) {
        if m.start() > last {
            split_fragment(&word[last..m.start()], &mut items);
        }
        items.push(m.as_str().to_string());
        last = m.end();
    }
    if last < word.len() {
        split_fragment(&word[last..], &mut items);
    }
    items
}

fn split_fragment(fragment: &str, items: &mut Vec<String>) {
    let mut rest = fragment;
    while !rest.is_empty() {
        match RE_VOWEL_GROUP.find(rest) {
            Some(m) => {
                items.push(rest[..m.end()].to_string());
                rest = &rest[m.end()..];
            }
            None => {
                // No vowel left: the residue is a bare consonant cluster.
                items.push(rest.to_string());
                break;
            }
        }
    }
}

/// Classify one split item (or several TAB-joined items) as a one-character
/// code per part: `' '` empty, `'u'` audio, `'n'` number, `'p'` punctuation,
/// else vowel-presence (4) plus consonant count (0, 1, 2+) summed.
pub fn aksara_type(item: &str) -> String {
    item.split('\t').map(part_type).collect()
}

fn part_type(part: &str) -> char {
    let Some(first) = part.chars().next() else {
        return ' ';
    };
    if first == AUDIO_MARKER {
        return 'u';
    }
    if first.is_ascii_digit() || ('०'..='९').contains(&first) {
        return 'n';
    }
    if ",.?!:|।॥".contains(first) {
        return 'p';
    }
    let vowel = if RE_VOWEL_CHAR.is_match(part) { 4u8 } else { 0 };
    let consonants = RE_CONSONANT.find_iter(part).count().min(2) as u8;
    char::from(b'0' + vowel + consonants)
}

/// Collect the audio number after each marker into `out` and return the
/// text with the numbers stripped (markers retained).
pub fn pick_audio_numbers(out: &mut Vec<String>, text: &str) -> String {
    RE_AUDIO_NUMBER
        .replace_all(text, |caps: &regex::Captures| {
            out.push(
                caps.get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            );
            AUDIO_MARKER.to_string()
        })
        .into_owned()
}

/// Reinsert audio numbers: the i-th marker gets `audios[start + i]` appended.
pub fn refill_audio_numbers(audios: &[String], start: usize, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    for c in text.chars() {
        out.push(c);
        if c == AUDIO_MARKER {
            if let Some(audio) = audios.get(start + i) {
                out.push_str(audio);
            }
            i += 1;
        }
    }
    out
}

fn is_marker(item: &str) -> bool {
    item.starts_with(AUDIO_MARKER)
}

fn ends_in_vowel(item: &str) -> bool {
    item.chars()
        .next_back()
        .is_some_and(|c| RE_VOWEL_CHAR.is_match(c.encode_utf8(&mut [0u8; 4])))
}

/// The consonant token a cluster starts with, ignoring a leading dash.
fn leading_consonant(item: &str) -> Option<&str> {
    let item = item.strip_prefix('-').unwrap_or(item);
    RE_CONSONANT_AT_START.find(item).map(|m| m.as_str())
}

fn first_alpha_is_consonant(item: &str) -> bool {
    match item.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((idx, _)) => RE_CONSONANT_AT_START.is_match(&item[idx..]),
        None => false,
    }
}

/// Fold a word-final orphan consonant into the preceding vowel-final
/// syllable, tolerating audio markers after it.
pub(crate) fn merge_trailing_consonant(syllables: &mut Vec<String>) {
    let Some(last) = (0..syllables.len()).rev().find(|&j| !is_marker(&syllables[j])) else {
        return;
    };
    if !RE_SINGLE_CONSONANT.is_match(&syllables[last]) {
        return;
    }
    let Some(prev) = (0..last).rev().find(|&j| !is_marker(&syllables[j])) else {
        return;
    };
    if ends_in_vowel(&syllables[prev]) {
        let orphan = syllables.remove(last);
        syllables[prev].push_str(&orphan);
    }
}

/// Right-to-left consonant migration over two parallel lists.
///
/// `sy2` is the phonetic split handed to the transliterator; `syllables` is
/// the display split. Rule 1 absorbs an orphan consonant into the following
/// cluster in `sy2` (and folds the display copy into its predecessor when
/// that predecessor ends in a vowel). Rule 2, behind `move_consonant`, pulls
/// a movable lead consonant onto the previous display syllable.
///
/// Indices below the scan point stay aligned between the two lists; lookups
/// to the right are re-resolved structurally and mutations are guarded,
/// since earlier steps may have let the tails drift.
pub fn combine_adjacent_consonants(
    syllables: &mut Vec<String>,
    sy2: &mut Vec<String>,
    move_consonant: bool,
) {
    let mut i = sy2.len() as isize - 2;
    while i >= 0 {
        let iu = i as usize;
        let Some(li) = (0..=iu).rev().find(|&j| !is_marker(&sy2[j])) else {
            i -= 1;
            continue;
        };
        let Some(ri) = (iu + 1..sy2.len()).find(|&j| !is_marker(&sy2[j])) else {
            i = li as isize - 1;
            continue;
        };
        let left = sy2[li].trim_matches('-').to_string();
        let right = sy2[ri].clone();

        if RE_SINGLE_CONSONANT.is_match(&left) && first_alpha_is_consonant(&right) {
            sy2[ri] = match right.strip_prefix('-') {
                Some(rest) => format!("-{left}{rest}"),
                None => format!("{left}{right}"),
            };
            sy2.remove(li);
            if syllables.get(li).map(String::as_str) == Some(left.as_str()) {
                if let Some(prev) = (0..li).rev().find(|&j| !is_marker(&syllables[j])) {
                    if ends_in_vowel(&syllables[prev]) {
                        let orphan = syllables.remove(li);
                        syllables[prev].push_str(&orphan);
                    }
                }
            }
        } else if move_consonant && ends_in_vowel(&left) {
            if let Some(lead) = leading_consonant(&right) {
                if lead.chars().count() == 1 && RE_MOVABLE.is_match(lead) {
                    let lead = lead.to_string();
                    if let Some(rsi) = (li + 1..syllables.len()).find(|&j| !is_marker(&syllables[j]))
                    {
                        let target = syllables[rsi].strip_prefix('-').unwrap_or(&syllables[rsi]);
                        if let Some(rest) = target.strip_prefix(lead.as_str()) {
                            let dashed = syllables[rsi].starts_with('-');
                            let rest = rest.to_string();
                            syllables[rsi] = if dashed { format!("-{rest}") } else { rest };
                            syllables[li].push_str(&lead);
                            if syllables[rsi].is_empty() {
                                syllables.remove(rsi);
                            }
                        }
                    }
                }
            }
        }
        i = li as isize - 1;
    }
}
