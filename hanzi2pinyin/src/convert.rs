//! Converting text to pinyin.
//!
//! A [`Converter`] splits its input into characters, looks each one up in a
//! [`Dictionary`], and keeps the per-character outcome in a
//! [`Transcription`]. Rendering a transcription applies the capitalization
//! and separator from [`FormatOptions`], either as full syllables or as
//! initials.

use std::borrow::Cow;

use thiserror::Error;
use tracing::{debug_span, trace};

use crate::{
    dictionary::Dictionary,
    fallback::{self, Fallback},
    format::{self, Format},
    resolve::{self, Resolved},
    split::{split, Unit},
};

/// Options controlling how readings are rendered.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Text inserted between consecutive syllables or initials.
    pub separator: String,
    /// Whether to uppercase the first letter of every syllable or initial.
    #[cfg_attr(feature = "serde", serde(alias = "capitalize_first_letter"))]
    pub capitalize_first_letter: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: String::new(),
            capitalize_first_letter: true,
        }
    }
}

impl FormatOptions {
    /// Default options with the given separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    /// The same options, without capitalization.
    #[must_use]
    pub fn lowercase(self) -> Self {
        Self {
            capitalize_first_letter: false,
            ..self
        }
    }
}

/// Error type for conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input is not valid UTF-8 text.
    #[error("word is not a string value")]
    NotAString(#[from] std::str::Utf8Error),
    /// A character has no reading in the dictionary.
    #[error("No reading for \"{character}\" at position {position}")]
    Unresolved {
        /// The character without a reading.
        character: char,
        /// Its index among the input characters.
        position: usize,
    },
}

/// Per-character readings of a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcription<'a> {
    /// One unit per input character, in input order.
    pub units: Vec<Resolved<'a>>,
}

impl<'a> Transcription<'a> {
    /// The first character without a reading, if any.
    pub fn first_unresolved(&self) -> Option<ConvertError> {
        self.units
            .iter()
            .enumerate()
            .find_map(|(position, unit)| match *unit {
                Resolved::Unresolved(character) => Some(ConvertError::Unresolved {
                    character,
                    position,
                }),
                _ => None,
            })
    }

    /// Fails on the first character without a reading.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Unresolved`] for the first unresolved character.
    pub fn check(self) -> Result<Self, ConvertError> {
        match self.first_unresolved() {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }

    /// The lowercase syllables, `None` where a character has no reading.
    /// Escaped units are left out.
    pub fn syllables(&self) -> Vec<Option<&'a str>> {
        self.units
            .iter()
            .filter_map(|unit| match *unit {
                Resolved::Reading { syllable, .. } => Some(Some(syllable)),
                Resolved::Unresolved(_) => Some(None),
                Resolved::Escaped(_) => None,
            })
            .collect()
    }

    /// Renders full syllables.
    pub fn full(&self, options: &FormatOptions, fallback: &(impl Fallback + ?Sized)) -> String {
        let style: &dyn Format = if options.capitalize_first_letter {
            &format::capitalized
        } else {
            &format::syllable
        };

        format::join(&self.units, style, fallback, &options.separator)
    }

    /// Renders the first letter of every syllable.
    pub fn initials(&self, options: &FormatOptions, fallback: &(impl Fallback + ?Sized)) -> String {
        let style: &dyn Format = if options.capitalize_first_letter {
            &format::initial_uppercase
        } else {
            &format::initial
        };

        format::join(&self.units, style, fallback, &options.separator)
    }
}

/// Converts text using a dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'d> {
    dictionary: &'d Dictionary,
}

#[cfg(feature = "integrated")]
impl Converter<'static> {
    /// A converter over the dictionary embedded at build time.
    pub fn new_with_integrated_dictionary() -> Self {
        Self::new(crate::integrated_dictionary())
    }
}

impl<'d> Converter<'d> {
    /// A converter over `dictionary`.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    /// The dictionary readings come from.
    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    /// The reading of a single character, see [`resolve::resolve`].
    pub fn resolve(&self, c: char, capitalize_first_letter: bool) -> Option<Cow<'d, str>> {
        resolve::resolve(self.dictionary, c, capitalize_first_letter)
    }

    /// Splits `text` and looks up every character.
    ///
    /// With `escape`, non-Chinese characters are replaced by the escape text
    /// and rendered literally instead of being looked up.
    pub fn transcribe<'a>(&self, text: &str, escape: Option<&'a str>) -> Transcription<'a>
    where
        'd: 'a,
    {
        let _span = debug_span!("transcribe", len = text.len()).entered();

        let units = split(text, escape)
            .into_iter()
            .map(|unit| match unit {
                Unit::Char(character) => match self.dictionary.reading(character) {
                    Some(syllable) => Resolved::Reading {
                        character,
                        syllable,
                    },
                    None => {
                        trace!(%character, "no reading");
                        Resolved::Unresolved(character)
                    }
                },
                Unit::Escaped(escaped) => Resolved::Escaped(escaped),
            })
            .collect();

        Transcription { units }
    }

    /// Converts `text` to full pinyin.
    ///
    /// Characters without a reading show up as `undefined`.
    pub fn convert(&self, text: &str, options: &FormatOptions) -> String {
        self.convert_with(text, options, &fallback::undefined)
    }

    /// Converts `text` to full pinyin, with a custom fallback for characters
    /// without a reading.
    pub fn convert_with(
        &self,
        text: &str,
        options: &FormatOptions,
        fallback: &(impl Fallback + ?Sized),
    ) -> String {
        self.transcribe(text, None).full(options, fallback)
    }

    /// Converts `text` to pinyin initials.
    pub fn initials(&self, text: &str, options: &FormatOptions, escape: Option<&str>) -> String {
        self.initials_with(text, options, escape, &fallback::undefined)
    }

    /// Converts `text` to pinyin initials, with a custom fallback for
    /// characters without a reading.
    pub fn initials_with(
        &self,
        text: &str,
        options: &FormatOptions,
        escape: Option<&str>,
        fallback: &(impl Fallback + ?Sized),
    ) -> String {
        self.transcribe(text, escape).initials(options, fallback)
    }

    /// Converts `text` to full pinyin, failing on characters without a reading.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Unresolved`] for the first such character.
    pub fn try_convert(&self, text: &str, options: &FormatOptions) -> Result<String, ConvertError> {
        let transcription = self.transcribe(text, None).check()?;
        Ok(transcription.full(options, &fallback::undefined))
    }

    /// Converts `text` to pinyin initials, failing on characters without a
    /// reading.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Unresolved`] for the first such character.
    pub fn try_initials(
        &self,
        text: &str,
        options: &FormatOptions,
        escape: Option<&str>,
    ) -> Result<String, ConvertError> {
        let transcription = self.transcribe(text, escape).check()?;
        Ok(transcription.initials(options, &fallback::undefined))
    }

    /// Converts raw bytes to full pinyin.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotAString`] if `bytes` is not UTF-8.
    pub fn convert_bytes(&self, bytes: &[u8], options: &FormatOptions) -> Result<String, ConvertError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.convert(text, options))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dictionary::{self, Dictionary};

    fn dictionary() -> Dictionary {
        dictionary::build(
            "\
a:啊阿
guo:国果
ren:人
zhang:长
chang:长
zhong:中钟
"
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn converts_with_options() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);

        assert_eq!(converter.convert("中国", &FormatOptions::default()), "ZhongGuo");
        assert_eq!(
            converter.convert("中国", &FormatOptions::default().lowercase()),
            "zhongguo"
        );
        assert_eq!(
            converter.convert("中国", &FormatOptions::with_separator("-")),
            "Zhong-Guo"
        );
        assert_eq!(
            converter.convert("中国", &FormatOptions::with_separator("==").lowercase()),
            "zhong==guo"
        );
        assert_eq!(converter.convert("", &FormatOptions::default()), "");
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);
        assert_eq!(converter.convert("长", &FormatOptions::default()), "Zhang");
    }

    #[test]
    fn single_letter_syllables_stay_lowercase() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);
        assert_eq!(converter.convert("啊人", &FormatOptions::default()), "aRen");
        assert_eq!(converter.initials("啊人", &FormatOptions::default(), None), "AR");
    }

    #[test]
    fn unresolved_characters() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);
        let options = FormatOptions::with_separator(" ");

        assert_eq!(converter.convert("中x国", &options), "Zhong undefined Guo");
        assert_eq!(
            converter.convert_with("中x国", &options, &fallback::keep),
            "Zhong x Guo"
        );
        assert_eq!(
            converter.convert_with("中x国", &options, &fallback::skip),
            "Zhong Guo"
        );
        assert_eq!(
            converter.try_convert("中x国", &options),
            Err(ConvertError::Unresolved {
                character: 'x',
                position: 1,
            })
        );
        assert_eq!(converter.try_convert("中国", &options).as_deref(), Ok("Zhong Guo"));
    }

    #[test]
    fn initials() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);

        assert_eq!(converter.initials("中国人", &FormatOptions::default(), None), "ZGR");
        assert_eq!(
            converter.initials("中国人", &FormatOptions::with_separator(".").lowercase(), None),
            "z.g.r"
        );
        assert_eq!(
            converter.initials("中x国", &FormatOptions::default(), None),
            "ZundefinedG"
        );
    }

    #[test]
    fn initials_with_escape() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);

        assert_eq!(
            converter.initials("中 国!", &FormatOptions::default(), Some("_")),
            "Z_G_"
        );
        assert_eq!(
            converter.try_initials("中 国", &FormatOptions::with_separator("-"), Some(" ")),
            Ok("Z- -G".to_string())
        );
        // escaping only covers non-Chinese characters
        assert_eq!(
            converter.try_initials("中猫", &FormatOptions::default(), Some("_")),
            Err(ConvertError::Unresolved {
                character: '猫',
                position: 1,
            })
        );
    }

    #[test]
    fn transcription() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);
        let transcription = converter.transcribe("中x国", None);

        assert_eq!(transcription.syllables(), [Some("zhong"), None, Some("guo")]);
        assert_eq!(
            transcription.first_unresolved(),
            Some(ConvertError::Unresolved {
                character: 'x',
                position: 1,
            })
        );
        assert_eq!(transcription.units.len(), 3);
    }

    #[test]
    fn resolves_single_characters() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);
        assert_eq!(converter.resolve('国', true).as_deref(), Some("Guo"));
        assert_eq!(converter.resolve('国', false).as_deref(), Some("guo"));
        assert_eq!(converter.resolve('x', true), None);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let dictionary = dictionary();
        let converter = Converter::new(&dictionary);

        let err = converter
            .convert_bytes(&[0xe4, 0xb8], &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotAString(_)));
        assert_eq!(err.to_string(), "word is not a string value");

        assert_eq!(
            converter
                .convert_bytes("中国".as_bytes(), &FormatOptions::default())
                .as_deref(),
            Ok("ZhongGuo")
        );
    }
}
