use std::borrow::Cow;

use crate::dictionary::Dictionary;

/// The outcome of resolving one unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A character and its syllable.
    Reading {
        /// The input character.
        character: char,
        /// Its lowercase syllable.
        syllable: &'a str,
    },
    /// A character the dictionary does not list.
    Unresolved(char),
    /// Escape text standing in for a non-Chinese character.
    Escaped(&'a str),
}

/// Uppercases the first character of a syllable longer than one character.
///
/// Single-character syllables such as `a` or `e` are returned unchanged.
pub fn capitalize(syllable: &str) -> Cow<'_, str> {
    let mut chars = syllable.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) if !first.is_uppercase() => {
            let mut s = String::with_capacity(syllable.len());
            s.extend(first.to_uppercase());
            s.push_str(&syllable[first.len_utf8()..]);
            Cow::Owned(s)
        }
        _ => Cow::Borrowed(syllable),
    }
}

/// Looks up the reading of a single character.
///
/// `None` means the dictionary has no syllable for `c`. That is a normal
/// outcome, not an error.
pub fn resolve(dictionary: &Dictionary, c: char, capitalize_first_letter: bool) -> Option<Cow<'_, str>> {
    dictionary.reading(c).map(|syllable| {
        if capitalize_first_letter {
            capitalize(syllable)
        } else {
            Cow::Borrowed(syllable)
        }
    })
}
