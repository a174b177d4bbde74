#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]

use dictionary::Dictionary;

#[cfg(feature = "integrated")]
static DICTIONARY: once_cell::sync::Lazy<Dictionary> = once_cell::sync::Lazy::new(|| {
    let dict_bytes = include_bytes!(concat!(env!("OUT_DIR"), "/dict.bin"));
    let dictionary: Dictionary =
        bincode::deserialize(dict_bytes).expect("embedded dictionary image is malformed");

    tracing::debug!(syllables = dictionary.len(), "loaded integrated dictionary");
    dictionary
});

pub mod convert;
pub mod dictionary;
pub mod fallback;
pub mod format;
mod parse;
pub mod resolve;
pub mod split;

pub use convert::{ConvertError, Converter, FormatOptions, Transcription};

/// The dictionary embedded at build time, decoded on first use.
#[cfg(feature = "integrated")]
pub fn integrated_dictionary() -> &'static Dictionary {
    &DICTIONARY
}

/// Converts `text` to full pinyin with the integrated dictionary.
///
/// ```
/// use hanzi2pinyin::{convert_to_pinyin, FormatOptions};
///
/// assert_eq!(convert_to_pinyin("中国", &FormatOptions::default()), "ZhongGuo");
/// assert_eq!(convert_to_pinyin("中国", &FormatOptions::with_separator("-")), "Zhong-Guo");
/// ```
#[cfg(feature = "integrated")]
pub fn convert_to_pinyin(text: &str, options: &FormatOptions) -> String {
    Converter::new_with_integrated_dictionary().convert(text, options)
}

/// Converts `text` to pinyin initials with the integrated dictionary.
///
/// With `escape`, non-Chinese characters are replaced by the escape text.
#[cfg(feature = "integrated")]
pub fn convert_to_initials(text: &str, options: &FormatOptions, escape: Option<&str>) -> String {
    Converter::new_with_integrated_dictionary().initials(text, options, escape)
}
