use std::borrow::Cow;

/// Decides what a character without a reading contributes to the output.
///
/// Returning `None` drops the character, separator included.
pub trait Fallback {
    /// Text to emit in place of `c`, if any.
    fn fallback(&self, c: char) -> Option<Cow<'static, str>>;
}

impl<T> Fallback for T
where
    T: Fn(char) -> Option<Cow<'static, str>>,
{
    fn fallback(&self, c: char) -> Option<Cow<'static, str>> {
        self(c)
    }
}

/// Placeholder emitted by [`undefined`].
pub const UNDEFINED: &str = "undefined";

/// Emits the literal `undefined`, matching the established output format.
pub fn undefined(_: char) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(UNDEFINED))
}

/// Emits the character itself.
pub fn keep(c: char) -> Option<Cow<'static, str>> {
    Some(Cow::Owned(c.to_string()))
}

/// Emits nothing.
pub fn skip(_: char) -> Option<Cow<'static, str>> {
    None
}
