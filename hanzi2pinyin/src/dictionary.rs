//! Dictionary data structures and parsing.

use std::{
    collections::{BTreeMap, HashSet},
    io::BufRead,
};

use tracing::debug;

use crate::parse::{dictionary_line, is_skippable};

/// A syllable and the characters sharing that reading.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableEntry {
    /// The romanized reading, e.g. `zhong`.
    pub syllable: String,
    /// The characters with that reading, in declaration order.
    pub characters: Vec<char>,
}

impl From<crate::parse::SyllableEntry<'_>> for SyllableEntry {
    fn from(value: crate::parse::SyllableEntry<'_>) -> Self {
        Self {
            syllable: value.syllable.to_string(),
            characters: value.characters.chars().collect(),
        }
    }
}

/// A mapping from syllables to the characters sharing them.
///
/// Entries keep the order they were declared in. A character listed under
/// several syllables resolves to the first one, so lookups go through a
/// reverse index built in a single ordered pass.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<SyllableEntry>", into = "Vec<SyllableEntry>")
)]
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<SyllableEntry>,
    index: BTreeMap<char, usize>,
}

impl From<Vec<SyllableEntry>> for Dictionary {
    fn from(entries: Vec<SyllableEntry>) -> Self {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            for &c in &entry.characters {
                index.entry(c).or_insert(position);
            }
        }

        debug!(
            syllables = entries.len(),
            characters = index.len(),
            "dictionary indexed"
        );

        Self { entries, index }
    }
}

impl From<Dictionary> for Vec<SyllableEntry> {
    fn from(value: Dictionary) -> Self {
        value.entries
    }
}

impl Dictionary {
    /// Returns the first declared syllable listing `c`.
    pub fn reading(&self, c: char) -> Option<&str> {
        self.index
            .get(&c)
            .map(|&position| self.entries[position].syllable.as_str())
    }

    /// Returns every syllable listing `c`, in declaration order.
    pub fn readings(&self, c: char) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |entry| entry.characters.contains(&c))
            .map(|entry| entry.syllable.as_str())
    }

    /// Returns the characters declared under `syllable`.
    pub fn characters(&self, syllable: &str) -> Option<&[char]> {
        self.entries
            .iter()
            .find(|entry| entry.syllable == syllable)
            .map(|entry| entry.characters.as_slice())
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[SyllableEntry] {
        &self.entries
    }

    /// Number of syllables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no syllables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error type for dictionary building.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Error reading a line.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing a line.
    #[error("Failed to parse line: {0}")]
    Parse(String),
    /// A line without a syllable before the colon.
    #[error("Missing syllable on line: {0}")]
    EmptySyllable(String),
    /// The same syllable declared twice.
    #[error("Duplicate syllable: {0}")]
    DuplicateSyllable(String),
}

/// Builds a dictionary from a reader, one `syllable:characters` entry per line.
///
/// # Errors
///
/// Returns an error if the input reader fails to read or parse, or declares a
/// syllable more than once.
pub fn build(input_reader: impl BufRead) -> Result<Dictionary, BuildError> {
    let mut seen = HashSet::new();

    let entries = input_reader
        .lines()
        .try_fold(Vec::new(), |mut entries, line| {
            let line = line?;
            if is_skippable(&line) {
                return Ok(entries);
            }

            let (_, entry) =
                dictionary_line(&line).map_err(|_| BuildError::Parse(line.to_string()))?;

            if entry.syllable.is_empty() {
                return Err(BuildError::EmptySyllable(line.to_string()));
            }
            if !seen.insert(entry.syllable.to_string()) {
                return Err(BuildError::DuplicateSyllable(entry.syllable.to_string()));
            }

            entries.push(SyllableEntry::from(entry));
            Ok::<_, BuildError>(entries)
        })?;

    Ok(Dictionary::from(entries))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "\
# heteronyms resolve to the first syllable
chang:长常场
chong:重虫冲
guo:国果过
zhang:长张章
zhong:中钟重
";

    fn sample() -> Dictionary {
        build(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn builds_in_order() {
        let dictionary = sample();
        assert_eq!(dictionary.len(), 5);
        let syllables = dictionary
            .entries()
            .iter()
            .map(|e| e.syllable.as_str())
            .collect::<Vec<_>>();
        assert_eq!(syllables, ["chang", "chong", "guo", "zhang", "zhong"]);
    }

    #[test]
    fn first_declared_syllable_wins() {
        let dictionary = sample();
        assert_eq!(dictionary.reading('重'), Some("chong"));
        assert_eq!(dictionary.reading('长'), Some("chang"));
        assert_eq!(dictionary.reading('中'), Some("zhong"));
        assert_eq!(dictionary.reading('猫'), None);
    }

    #[test]
    fn index_agrees_with_ordered_scan() {
        let dictionary = sample();
        for entry in dictionary.entries() {
            for &c in &entry.characters {
                assert_eq!(dictionary.reading(c), dictionary.readings(c).next());
            }
        }
    }

    #[test]
    fn lists_all_readings() {
        let dictionary = sample();
        assert_eq!(
            dictionary.readings('重').collect::<Vec<_>>(),
            ["chong", "zhong"]
        );
        assert_eq!(dictionary.readings('猫').count(), 0);
    }

    #[test]
    fn characters_of_syllable() {
        let dictionary = sample();
        assert_eq!(dictionary.characters("guo"), Some(&['国', '果', '过'][..]));
        assert_eq!(dictionary.characters("mao"), None);
    }

    #[test]
    fn empty_input() {
        let dictionary = build("".as_bytes()).unwrap();
        assert!(dictionary.is_empty());
        assert_eq!(dictionary.reading('中'), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = build("guo:国\nguo:果\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateSyllable(s) if s == "guo"));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(matches!(
            build("guo 国\n".as_bytes()),
            Err(BuildError::Parse(_))
        ));
        assert!(matches!(
            build(":国\n".as_bytes()),
            Err(BuildError::EmptySyllable(_))
        ));
    }
}
