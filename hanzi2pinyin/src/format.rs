use std::borrow::Cow;

use crate::{fallback::Fallback, resolve::Resolved};

pub use crate::resolve::capitalize as capitalized;

/// Turns a resolved syllable into output text.
pub trait Format {
    /// Formats one syllable.
    fn format<'s>(&self, syllable: &'s str) -> Cow<'s, str>;
}

impl<T> Format for T
where
    T: for<'s> Fn(&'s str) -> Cow<'s, str>,
{
    fn format<'s>(&self, syllable: &'s str) -> Cow<'s, str> {
        self(syllable)
    }
}

/// The syllable as stored, lowercase.
pub fn syllable(syllable: &str) -> Cow<'_, str> {
    Cow::Borrowed(syllable)
}

/// The first letter of the syllable.
pub fn initial(syllable: &str) -> Cow<'_, str> {
    match syllable.chars().next() {
        Some(first) => Cow::Borrowed(&syllable[..first.len_utf8()]),
        None => Cow::Borrowed(syllable),
    }
}

/// The first letter of the syllable, uppercased.
pub fn initial_uppercase(syllable: &str) -> Cow<'_, str> {
    match syllable.chars().next() {
        Some(first) => Cow::Owned(first.to_uppercase().collect()),
        None => Cow::Borrowed(syllable),
    }
}

/// Formats every unit and joins the results with `separator`.
///
/// Escaped units are emitted as they are. Unresolved characters go through
/// `fallback`; when it yields nothing the unit is left out entirely.
pub fn join(
    units: &[Resolved<'_>],
    format: &(impl Format + ?Sized),
    fallback: &(impl Fallback + ?Sized),
    separator: &str,
) -> String {
    units
        .iter()
        .filter_map(|unit| match *unit {
            Resolved::Reading { syllable, .. } => Some(format.format(syllable)),
            Resolved::Unresolved(c) => fallback.fallback(c),
            Resolved::Escaped(text) => Some(Cow::Borrowed(text)),
        })
        .collect::<Vec<_>>()
        .join(separator)
}
