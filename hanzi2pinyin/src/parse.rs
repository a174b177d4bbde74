use nom::{
    bytes::complete::take_while,
    character::complete::{char, space0},
    combinator::{all_consuming, map, rest},
    sequence::{delimited, separated_pair},
    IResult,
};

#[derive(Debug, PartialEq, Eq)]
pub struct SyllableEntry<'a> {
    pub syllable: &'a str,
    pub characters: &'a str,
}

pub fn is_syllable_char(c: char) -> bool {
    c.is_alphabetic() && !c.is_uppercase()
}

pub fn take_syllable(input: &str) -> IResult<&str, &str> {
    delimited(space0, take_while(is_syllable_char), space0)(input)
}

pub fn dictionary_line(input: &str) -> IResult<&str, SyllableEntry> {
    all_consuming(map(
        separated_pair(take_syllable, char(':'), rest),
        |(syllable, characters): (&str, &str)| SyllableEntry {
            syllable,
            characters: characters.trim(),
        },
    ))(input)
}

/// Blank lines and `#` comments carry no entry.
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}
