//! The Roman-source engine: a longest-match tokenizer with implicit-vowel
//! bookkeeping.
//!
//! Tokens can be several characters long (`lRR`, `R^i`), so every position
//! tries candidate lengths from `max_token_len` down to one. A consonant
//! leaves its inherent short-a pending: the next token either supplies a
//! vowel mark, absorbs into the consonant (the source short-a), or forces a
//! virama.

use super::map::{swap_pairs, CompiledMap};
use super::Options;

pub fn transliterate_roman(data: &str, map: &CompiledMap, options: &Options) -> String {
    // Byte offset of every char boundary, so candidate tokens are plain
    // subslices of the input.
    let mut bounds: Vec<usize> = data.char_indices().map(|(i, _)| i).collect();
    bounds.push(data.len());
    let n = bounds.len() - 1;

    let max_len = map.max_token_len.max(1);
    let mut out = String::with_capacity(data.len());
    let mut had_consonant = false;
    let mut toggled_trans = false;
    let mut skipping_sgml = false;

    let mut i = 0;
    'outer: while i < n {
        let longest = max_len.min(n - i);
        for len in (1..=longest).rev() {
            let token = &data[bounds[i]..bounds[i + len]];
            // Opacity state first. Only the single-character `>` closes an
            // SGML span, so the state settles as the candidate lengths
            // shrink toward one.
            if skipping_sgml {
                skipping_sgml = token != ">";
            } else if token == "<" {
                skipping_sgml = options.skip_sgml;
            } else if token == "##" {
                toggled_trans = !toggled_trans;
                i += 2;
                continue 'outer;
            }
            let skipping = skipping_sgml || toggled_trans;

            if !skipping {
                if let Some(letter) = map.letters.get(token) {
                    if map.to_roman {
                        out.push_str(letter);
                    } else {
                        if had_consonant {
                            if let Some(mark) = map.marks.get(token) {
                                out.push_str(mark);
                            } else if token != map.from_scheme_a {
                                out.push_str(&map.virama);
                                out.push_str(letter);
                            }
                        } else {
                            out.push_str(letter);
                        }
                        had_consonant = map.consonants.contains(token);
                    }
                    i += len;
                    continue 'outer;
                }
            }
            if len == 1 {
                if skipping {
                    // Inside an escape: pass the character through without
                    // touching the implicit-vowel state, so tokens after
                    // the region transliterate as if it were not there.
                    out.push_str(token);
                } else {
                    // No token matched: close a pending consonant, then
                    // emit the character verbatim.
                    if had_consonant {
                        had_consonant = false;
                        if !options.syncope {
                            out.push_str(&map.virama);
                        }
                    }
                    out.push_str(token);
                }
                i += 1;
            }
        }
    }
    if had_consonant && !options.syncope {
        out.push_str(&map.virama);
    }

    if let Some(re) = &map.reorder_output {
        out = swap_pairs(re, &out);
    }
    out
}
