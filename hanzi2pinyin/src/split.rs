//! Splitting text into single-character units.

use std::ops::RangeInclusive;

/// Code points treated as Chinese characters (U+4E00 to U+9FA5).
pub const CHINESE_RANGE: RangeInclusive<u32> = 19968..=40869;

/// One unit of split input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    /// A single character of the input.
    Char(char),
    /// A non-Chinese character replaced by the escape text.
    Escaped(&'a str),
}

/// Whether `c` falls in the Chinese character range.
pub fn is_chinese_char(c: char) -> bool {
    CHINESE_RANGE.contains(&u32::from(c))
}

/// Whether every character of `word` is a Chinese character.
///
/// The empty string qualifies.
pub fn is_simplified_chinese(word: &str) -> bool {
    word.chars().all(is_chinese_char)
}

/// Splits `text` into characters, in order.
///
/// With `escape`, every character that is not Chinese is replaced by the
/// escape text, so the output always has one unit per input character.
pub fn split<'a>(text: &str, escape: Option<&'a str>) -> Vec<Unit<'a>> {
    match escape {
        Some(escape) => text
            .chars()
            .map(|c| {
                if is_chinese_char(c) {
                    Unit::Char(c)
                } else {
                    Unit::Escaped(escape)
                }
            })
            .collect(),
        None => text.chars().map(Unit::Char).collect(),
    }
}
